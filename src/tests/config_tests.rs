#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use crate::router::PageId;
    use std::env;
    use std::fs;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_temp_config(content: &str) -> NamedTempFile {
        let temp_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        fs::write(temp_file.path(), content).unwrap();
        temp_file
    }

    fn invalid(mutate: impl FnOnce(&mut AppConfig)) -> String {
        let mut cfg = AppConfig::default();
        mutate(&mut cfg);
        config::validate(&cfg).unwrap_err().to_string()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.backend.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.backend.api_prefix, "/api");
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.backend.connect_timeout(), Duration::from_secs(3));
        assert_eq!(config.polling.connectivity_ms, 5000);
        assert_eq!(config.polling.status_ms, 2000);
        assert_eq!(config.polling.status_identity_every, 30);
        assert_eq!(config.polling.players_ms, 1000);
        assert_eq!(config.polling.command_settle_ms, 500);
        assert_eq!(config.ui.changelog_capacity, 500);
        assert_eq!(config.start_page(), PageId::Status);
        assert!(config::validate(&config).is_ok());
    }

    #[test]
    fn test_config_from_file() {
        let config_content = r#"
[backend]
base_url = "https://mc.example.org"
request_timeout_ms = 2500

[polling]
status_ms = 4000

[ui]
start_page = "files"
changelog_capacity = 50
"#;
        let temp_file = write_temp_config(config_content);

        let config = config::load_with(Some(temp_file.path())).unwrap();

        assert_eq!(config.backend.base_url, "https://mc.example.org");
        assert_eq!(config.backend.request_timeout(), Duration::from_millis(2500));
        // Untouched keys keep their defaults
        assert_eq!(config.backend.api_prefix, "/api");
        assert_eq!(config.polling.status_ms, 4000);
        assert_eq!(config.polling.players_ms, 1000);
        assert_eq!(config.ui.changelog_capacity, 50);
        assert_eq!(config.start_page(), PageId::Files);
    }

    #[test]
    fn test_missing_extra_file_is_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("absent.toml");
        assert!(config::load_with(Some(missing.as_path())).is_ok());
    }

    #[test]
    fn test_invalid_file_value_is_rejected() {
        let temp_file = write_temp_config("[backend]\nbase_url = \"ftp://mc.example.org\"\n");
        let err = config::load_with(Some(temp_file.path())).unwrap_err();
        assert!(err.to_string().contains("backend.base_url must start with http:// or https://"));
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_file = write_temp_config("[polling]\nlogs_ms = 3000\n");
        env::set_var("MCCONTROL__POLLING__LOGS_MS", "7000");

        let config = config::load_with(Some(temp_file.path())).unwrap();
        assert_eq!(config.polling.logs_ms, 7000);

        env::remove_var("MCCONTROL__POLLING__LOGS_MS");
    }

    #[test]
    fn test_invalid_backend_values() {
        assert!(invalid(|c| c.backend.base_url = "  ".into()).contains("backend.base_url must not be empty"));
        assert!(invalid(|c| c.backend.base_url = "mc.local".into()).contains("must start with http://"));
        assert!(invalid(|c| c.backend.api_prefix = "api".into()).contains("backend.api_prefix must start with '/'"));
        assert!(invalid(|c| c.backend.request_timeout_ms = 0).contains("backend.request_timeout_ms must be > 0"));
        assert!(invalid(|c| c.backend.connect_timeout_ms = 0).contains("backend.connect_timeout_ms must be > 0"));
    }

    #[test]
    fn test_invalid_polling_values() {
        assert!(invalid(|c| c.polling.players_ms = 0).contains("polling.players_ms must be > 0"));
        assert!(invalid(|c| c.polling.connectivity_ms = 0).contains("polling.connectivity_ms must be > 0"));
        assert!(invalid(|c| c.polling.status_identity_every = 0).contains("polling.status_identity_every must be > 0"));
    }

    #[test]
    fn test_zero_settle_time_is_allowed() {
        let mut cfg = AppConfig::default();
        cfg.polling.command_settle_ms = 0;
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_invalid_ui_values() {
        assert!(invalid(|c| c.ui.changelog_capacity = 0).contains("ui.changelog_capacity must be > 0"));
        assert!(invalid(|c| c.ui.start_page = "inventory".into()).contains("ui.start_page is not a known page"));
    }

    #[test]
    fn test_start_page_aliases() {
        let mut cfg = AppConfig::default();
        cfg.ui.start_page = "Operators".into();
        assert_eq!(cfg.start_page(), PageId::Ops);
        cfg.ui.start_page = "nowhere".into();
        assert_eq!(cfg.start_page(), PageId::Status);
    }
}
