use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::router::PageId;

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_prefix: String,
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Refresh periods for the polling pages, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub connectivity_ms: u64,
    pub status_ms: u64,
    /// The status page refetches server identity every N status ticks.
    pub status_identity_every: u64,
    pub players_ms: u64,
    pub plugins_ms: u64,
    pub server_ms: u64,
    pub console_ms: u64,
    pub chat_ms: u64,
    pub access_lists_ms: u64,
    pub logs_ms: u64,
    pub command_settle_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub start_page: String,
    pub changelog_capacity: usize,
    pub viewport_width: i32,
    pub viewport_height: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub polling: PollingConfig,
    pub ui: UiConfig,
}

const DEFAULTS: &str = include_str!("../config/default.toml");

impl Default for AppConfig {
    fn default() -> Self {
        // Fallback: parse the embedded default TOML
        match ::config::Config::builder()
            .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
            .build()
        {
            Ok(cfg) => match cfg.try_deserialize() {
                Ok(app_cfg) => app_cfg,
                Err(e) => panic!("Failed to deserialize default config: {}", e),
            },
            Err(e) => panic!("Failed to parse default config: {}", e),
        }
    }
}

impl AppConfig {
    pub fn start_page(&self) -> PageId {
        self.ui.start_page.parse().unwrap_or(PageId::Status)
    }
}

/// Loads defaults -> mccontrol.toml -> $MCCONTROL_CONFIG -> MCCONTROL__* env.
pub fn load() -> anyhow::Result<AppConfig> {
    // Load .env first (optional)
    let _ = dotenvy::dotenv();

    let custom = std::env::var("MCCONTROL_CONFIG").ok();
    load_with(custom.as_deref().map(Path::new))
}

pub fn load_with(extra_file: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut builder = ::config::Config::builder()
        .add_source(::config::File::from_str(DEFAULTS, ::config::FileFormat::Toml))
        // Optional local file: mccontrol.toml (in CWD)
        .add_source(::config::File::with_name("mccontrol").required(false));

    if let Some(path) = extra_file {
        builder = builder.add_source(::config::File::from(path).required(false));
    }
    // Environment variables last to have highest precedence
    builder = builder.add_source(::config::Environment::with_prefix("MCCONTROL").separator("__"));

    let cfg = builder.build()?;
    let app_cfg: AppConfig = cfg.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    // Backend
    let base = cfg.backend.base_url.trim();
    if base.is_empty() {
        return Err(anyhow::anyhow!("backend.base_url must not be empty"));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow::anyhow!("backend.base_url must start with http:// or https://: {}", base));
    }
    if !cfg.backend.api_prefix.starts_with('/') {
        return Err(anyhow::anyhow!("backend.api_prefix must start with '/'"));
    }
    if cfg.backend.request_timeout_ms == 0 {
        return Err(anyhow::anyhow!("backend.request_timeout_ms must be > 0"));
    }
    if cfg.backend.connect_timeout_ms == 0 {
        return Err(anyhow::anyhow!("backend.connect_timeout_ms must be > 0"));
    }

    // Polling
    let p = &cfg.polling;
    let periods = [
        ("connectivity_ms", p.connectivity_ms),
        ("status_ms", p.status_ms),
        ("players_ms", p.players_ms),
        ("plugins_ms", p.plugins_ms),
        ("server_ms", p.server_ms),
        ("console_ms", p.console_ms),
        ("chat_ms", p.chat_ms),
        ("access_lists_ms", p.access_lists_ms),
        ("logs_ms", p.logs_ms),
    ];
    for (name, value) in periods {
        if value == 0 {
            return Err(anyhow::anyhow!("polling.{} must be > 0", name));
        }
    }
    if p.status_identity_every == 0 {
        return Err(anyhow::anyhow!("polling.status_identity_every must be > 0"));
    }

    // UI
    if cfg.ui.changelog_capacity == 0 {
        return Err(anyhow::anyhow!("ui.changelog_capacity must be > 0"));
    }
    if cfg.ui.start_page.parse::<PageId>().is_err() {
        return Err(anyhow::anyhow!("ui.start_page is not a known page: {}", cfg.ui.start_page));
    }
    if cfg.ui.viewport_width <= 0 || cfg.ui.viewport_height <= 0 {
        tracing::warn!(
            "Viewport {}x{} is not positive; context menus will pin to the origin",
            cfg.ui.viewport_width,
            cfg.ui.viewport_height
        );
    }

    Ok(())
}
