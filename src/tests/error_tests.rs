#[cfg(test)]
mod tests {
    use crate::error::{validation, ClientError, ClientResult};

    #[test]
    fn test_client_error_display() {
        let error = ClientError::Network("connection refused".to_string());
        assert_eq!(format!("{}", error), "Network error: connection refused");

        let error = ClientError::Timeout { after_ms: 10_000 };
        assert_eq!(format!("{}", error), "Request timed out after 10000 ms");

        let error = ClientError::Http { status: 404, message: "Player not found".to_string() };
        assert_eq!(format!("{}", error), "HTTP 404: Player not found");

        let error = ClientError::validation("name", "name cannot be empty");
        assert_eq!(format!("{}", error), "Validation error on field 'name': name cannot be empty");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ClientError::Network("refused".into()).user_message(), "The server could not be reached");
        assert_eq!(
            ClientError::Timeout { after_ms: 10_000 }.user_message(),
            "The server did not respond within 10 seconds"
        );
        assert_eq!(ClientError::Http { status: 500, message: "Disk full".into() }.user_message(), "Disk full");
        assert_eq!(ClientError::Backend("Unknown command".into()).user_message(), "Unknown command");
        assert_eq!(ClientError::Decode("eof".into()).user_message(), "The server sent an unexpected response");
        assert_eq!(ClientError::validation("uuid", "Invalid UUID: x").user_message(), "Invalid UUID: x");
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<u32>("\"seven\"").unwrap_err();
        let client_error: ClientError = err.into();
        assert!(matches!(client_error, ClientError::Decode(_)));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(validation::require_non_empty("Steve", "name").is_ok());
        let err = validation::require_non_empty(" \t", "name").unwrap_err();
        assert_eq!(err, ClientError::validation("name", "name cannot be empty"));
    }

    #[test]
    fn test_validate_item_id() {
        assert!(validation::validate_item_id("minecraft:diamond").is_ok());
        assert!(validation::validate_item_id("mymod:copper_ingot_2").is_ok());
        for bad in ["", "Minecraft:Diamond", "minecraft:diamond block", "minecraft/diamond"] {
            assert!(validation::validate_item_id(bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn test_normalize_uuid() {
        assert_eq!(
            validation::normalize_uuid("069A79F444E94726A5BEFCA90E38AAF5").unwrap(),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
        assert_eq!(
            validation::normalize_uuid(" 069a79f4-44e9-4726-a5be-fca90e38aaf5 ").unwrap(),
            "069a79f4-44e9-4726-a5be-fca90e38aaf5"
        );
        let err = validation::normalize_uuid("steve").unwrap_err();
        assert_eq!(err.user_message(), "Invalid UUID: steve");
    }

    #[test]
    fn test_client_result_propagation() {
        fn parse(raw: &str) -> ClientResult<String> {
            validation::require_non_empty(raw, "uuid")?;
            let uuid = validation::normalize_uuid(raw)?;
            Ok(uuid)
        }

        assert!(parse("").is_err());
        assert!(parse("not-a-uuid").is_err());
        assert!(parse("069a79f444e94726a5befca90e38aaf5").is_ok());
    }
}
