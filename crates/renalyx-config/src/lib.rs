//! Configuration loading for renalyx.
//! Reads renalyx.toml from the current directory or the path in the RENALYX_CONFIG env var.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use renalyx_common::{LabelPolicy, RenalyxError};
use renalyx_model::ArtifactFormat;
use renalyx_report::{ReportOptions, RendererPolicy};

pub const CONFIG_ENV: &str = "RENALYX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "renalyx.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Config file unreadable: {0}")]
    Read(#[from] std::io::Error),

    #[error("Config file invalid: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for RenalyxError {
    fn from(err: ConfigError) -> Self {
        RenalyxError::Config(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 5000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    /// Inferred from the file extension when absent.
    #[serde(default)]
    pub format: Option<ArtifactFormat>,
}

fn default_model_path() -> PathBuf { PathBuf::from("ckd_model.json") }

impl Default for ModelConfig {
    fn default() -> Self {
        Self { path: default_model_path(), format: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub policy: RendererPolicy,
    #[serde(default = "default_heading")]
    pub heading: String,
    #[serde(default = "bool_true")]
    pub include_inputs: bool,
}

fn default_heading() -> String { "Your Hospital Name".to_string() }
fn bool_true()       -> bool   { true }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            policy: RendererPolicy::default(),
            heading: default_heading(),
            include_inputs: bool_true(),
        }
    }
}

impl ReportConfig {
    /// An empty heading disables it.
    pub fn options(&self) -> ReportOptions {
        let heading = self.heading.trim();
        ReportOptions {
            policy: self.policy,
            heading: (!heading.is_empty()).then(|| heading.to_string()),
            include_inputs: self.include_inputs,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelsConfig {
    #[serde(default)]
    pub policy: LabelPolicy,
}

impl Config {
    /// Load configuration.
    ///
    /// A path named by RENALYX_CONFIG must exist. Without it, ./renalyx.toml
    /// is used when present and built-in defaults otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    warn!("{} not found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
