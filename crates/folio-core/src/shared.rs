//! Shared configuration used by the core and the gateway.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Env var naming the config file (without or with the `.toml` extension).
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/gateway";

/// Global application configuration (gateway identity + chat pacing). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown by `/v1/status`.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Fixed part of the simulated "assistant is typing" pause.
    pub typing_delay_ms: u64,
    /// Upper bound of the random extra pause added on top of `typing_delay_ms`.
    pub typing_jitter_ms: u64,
    /// Chat sessions untouched for this long are dropped when a new one opens.
    pub session_idle_secs: u64,
    /// Upper bound on open chat sessions; the least recently used one is dropped beyond it.
    pub max_sessions: usize,

    /// If true, `folio-gateway` serves the static page from `site/`. (Config alias: `ui_enabled`)
    #[serde(default, alias = "ui_enabled")]
    pub frontend_enabled: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            app_name: "Portfolio Gateway".to_string(),
            port: 8001,
            typing_delay_ms: 500,
            typing_jitter_ms: 500,
            session_idle_secs: 1800,
            max_sessions: 1000,
            frontend_enabled: false,
        }
    }
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `FOLIO_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Same layering as [`CoreConfig::load`] with an explicit file path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("app_name", defaults.app_name)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("typing_delay_ms", defaults.typing_delay_ms as i64)?
            .set_default("typing_jitter_ms", defaults.typing_jitter_ms as i64)?
            .set_default("session_idle_secs", defaults.session_idle_secs as i64)?
            .set_default("max_sessions", defaults.max_sessions as i64)?
            .set_default("frontend_enabled", defaults.frontend_enabled)?;

        let builder = builder.add_source(config::File::from(path).required(false));

        let built = builder
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
