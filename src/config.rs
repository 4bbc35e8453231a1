use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub checkout: CheckoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied when a checkout request omits the corresponding flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// SSH port of the review host
    #[serde(default = "default_port")]
    pub port: String,

    /// Checkout directory relative to the workspace root
    #[serde(default = "default_target_dir")]
    pub target_dir: String,

    /// Workspace root the executor resolves target directories against
    #[serde(default = "default_workspace")]
    pub workspace: String,

    /// Credentials id used when `--credentials` is not given
    #[serde(default)]
    pub credentials_id: Option<String>,
}

fn default_port() -> String {
    "29418".to_string()
}

fn default_target_dir() -> String {
    "./".to_string()
}

fn default_workspace() -> String {
    ".".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            target_dir: default_target_dir(),
            workspace: default_workspace(),
            credentials_id: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Path to the project-local config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".pipegit.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so pipegit works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // Project config next to the workspace (primary config location)
        let project_config = Self::project_config_path();
        if project_config.exists() {
            builder = builder.add_source(config::File::from(project_config));
        }

        // User config in ~/.config/pipegit/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pipegit").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with PIPEGIT_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("PIPEGIT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Workspace root as an absolute path
    pub fn workspace_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.checkout.workspace);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }
}
