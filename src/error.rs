use thiserror::Error;

/// The error type for every call the dashboard makes.
///
/// The variants follow the three failure classes the UI distinguishes:
/// connectivity problems (which toggle the offline overlay), errors reported
/// by the backend (surfaced in a modal with the backend's message), and
/// validation failures caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The backend could not be reached at all.
    #[error("Network error: {0}")]
    Network(String),
    /// The request did not complete within the configured timeout.
    #[error("Request timed out after {after_ms} ms")]
    Timeout {
        /// The timeout that expired.
        after_ms: u64,
    },
    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The backend's `error` message, or the status text.
        message: String,
    },
    /// The backend answered 2xx but with an `{"error": ...}` body.
    #[error("Backend error: {0}")]
    Backend(String),
    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
    /// User input was rejected before any request was made.
    #[error("Validation error on field '{field}': {message}")]
    Validation {
        /// The name of the field that failed validation.
        field: String,
        /// A message describing the validation error.
        message: String,
    },
}

impl ClientError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ClientError::Validation { field: field.to_string(), message: message.into() }
    }

    /// The text shown to the user in an alert.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network(_) => "The server could not be reached".to_string(),
            ClientError::Timeout { after_ms } => {
                format!("The server did not respond within {} seconds", after_ms / 1000)
            }
            ClientError::Http { message, .. } => message.clone(),
            ClientError::Backend(message) => message.clone(),
            ClientError::Decode(_) => "The server sent an unexpected response".to_string(),
            ClientError::Validation { message, .. } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// A type alias for `Result<T, ClientError>`, used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

/// Input checks shared by the pages and the file manager.
pub mod validation {
    use super::*;

    /// Rejects empty (after trimming) values.
    pub fn require_non_empty(value: &str, field: &str) -> ClientResult<()> {
        if value.trim().is_empty() {
            return Err(ClientError::validation(field, format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// Item identifiers are lowercase namespaced ids such as `minecraft:diamond`.
    pub fn validate_item_id(item: &str) -> ClientResult<()> {
        let valid = !item.is_empty()
            && item.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ':');
        if !valid {
            return Err(ClientError::validation(
                "item",
                format!(
                    "Invalid item ID: \"{}\". Use only lowercase letters, numbers, underscores, and colons (e.g., \"minecraft:diamond\")",
                    item
                ),
            ));
        }
        Ok(())
    }

    /// Normalises a player UUID (with or without dashes) to the hyphenated form.
    pub fn normalize_uuid(raw: &str) -> ClientResult<String> {
        uuid::Uuid::parse_str(raw.trim())
            .map(|u| u.hyphenated().to_string())
            .map_err(|_| ClientError::validation("uuid", format!("Invalid UUID: {}", raw.trim())))
    }
}
