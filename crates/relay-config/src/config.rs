use crate::{ConfigError, ConfigErrorResult, LoggingConfig, ServerConfig, WebSocketConfig};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub websocket: WebSocketConfig,
}

impl Config {
    /// Load configuration from disk and environment.
    ///
    /// Loading order:
    /// 1. Check for RELAY_CONFIG_DIR env var, else use ./.relay/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply RELAY_* environment variable overrides
    ///
    /// Validation is separate; call validate() once at startup.
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // First run: create the directory so a config.toml can be dropped in later
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse a TOML file, keeping the path in any error.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Resolve the config directory.
    /// Priority: RELAY_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("RELAY_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".relay"))
    }

    /// Check every section. The server refuses to start on the first failure.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.logging.validate()?;
        self.websocket.validate()?;

        Ok(())
    }

    /// `host:port` string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  websocket: send_buffer={}, event_buffer={}, write_timeout={}ms",
            self.websocket.send_buffer_size,
            self.websocket.event_buffer_size,
            self.websocket.write_timeout_ms
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("RELAY_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("RELAY_SERVER_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("RELAY_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("RELAY_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("RELAY_LOG_FILE", &mut self.logging.file);

        // WebSocket
        Self::apply_env_parse(
            "RELAY_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "RELAY_WS_EVENT_BUFFER_SIZE",
            &mut self.websocket.event_buffer_size,
        );
        Self::apply_env_parse(
            "RELAY_WS_WRITE_TIMEOUT_MS",
            &mut self.websocket.write_timeout_ms,
        );
    }

    /// String override from the environment.
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Bool override; "true" and "1" are truthy, anything else is false.
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Parsed override; unparseable values leave the target untouched.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Optional-string override; presence of the var sets Some.
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
