use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_MARKUP_PERCENT: f64 = 12.5;
pub const DEFAULT_TICKER_URL: &str = "https://blockchain.info";

/// Read-only settings injected into the dispatcher and the reply formatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandConfig {
    pub markup_percent: f64,
    pub rich_formatting: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        CommandConfig {
            markup_percent: DEFAULT_MARKUP_PERCENT,
            rich_formatting: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BlockchainProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retries: usize,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for BlockchainProviderConfig {
    fn default() -> Self {
        BlockchainProviderConfig {
            base_url: DEFAULT_TICKER_URL.to_string(),
            timeout_secs: default_timeout_secs(),
            retries: 0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub blockchain: BlockchainProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_markup")]
    pub markup_percent: f64,
    #[serde(default = "default_rich_formatting")]
    pub rich_formatting: bool,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_markup() -> f64 {
    DEFAULT_MARKUP_PERCENT
}

fn default_rich_formatting() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            markup_percent: default_markup(),
            rich_formatting: default_rich_formatting(),
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file if present, then applies environment
    /// overrides.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        let config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };
        config.with_env_overrides()
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "smsbtc", "smsbtc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if !config.markup_percent.is_finite() {
            return Err(anyhow!(
                "Invalid markup_percent {} in {}",
                config.markup_percent,
                path.as_ref().display()
            ));
        }
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies `MARKUP_PERCENTAGE`, `ENABLE_WHATSAPP_FORMATTING` and `PORT`
    /// from the process environment (and a `.env` file, if any).
    pub fn with_env_overrides(self) -> Result<Self> {
        dotenvy::dotenv().ok();
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup("MARKUP_PERCENTAGE") {
            let markup: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid MARKUP_PERCENTAGE: {value}"))?;
            if !markup.is_finite() {
                return Err(anyhow!("Invalid MARKUP_PERCENTAGE: {value}"));
            }
            self.markup_percent = markup;
        }
        if let Some(value) = lookup("ENABLE_WHATSAPP_FORMATTING") {
            self.rich_formatting = match value.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => return Err(anyhow!("Invalid ENABLE_WHATSAPP_FORMATTING: {value}")),
            };
        }
        if let Some(value) = lookup("PORT") {
            self.server.port = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {value}"))?;
        }
        Ok(self)
    }

    pub fn command_config(&self) -> CommandConfig {
        CommandConfig {
            markup_percent: self.markup_percent,
            rich_formatting: self.rich_formatting,
        }
    }
}
