use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fixed names of the transient script and results files. One in-flight
/// operation at a time owns them; none survives the operation that created
/// it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct ArtifactNames {
    pub change_file: String,
    pub reset_file: String,
    pub list_file: String,
    pub results_file: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            change_file: "change.bat".to_string(),
            reset_file: "reset.bat".to_string(),
            list_file: "list_all_interfaces.bat".to_string(),
            results_file: "net_interfaces_results.txt".to_string(),
        }
    }
}

/// Application configuration, passed into the orchestrator at construction
/// so tests can point the fetcher and the artifacts somewhere harmless.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    /// Raw-text resource holding the DNS server address.
    pub dns_url: String,
    /// Page opened by the optional post-apply browser launch.
    pub landing_url: String,
    pub artifacts: ArtifactNames,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dns_url: "https://gist.githubusercontent.com/luisbraganca/1c756ab03c94ce49f60be89092f28c0b/raw/2f7bbf59ed80cd499c5873deedea655a206c09e9/opendns.txt".to_string(),
            landing_url: "http://google.com".to_string(),
            artifacts: ArtifactNames::default(),
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::data_local_dir)
        .ok_or(ConfigError::ConfigDirNotFound)?;

    let app_config_dir = config_dir.join("dnswitch");
    Ok(app_config_dir.join("config.jsonc"))
}

/// Parses a jsonc document into an [`AppConfig`]; line and block comments
/// are allowed.
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let stripped = json_comments::StripComments::new(content.as_bytes());
    Ok(serde_json::from_reader(stripped)?)
}

pub fn load_config() -> Result<AppConfig> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&config_path)?;
    parse_config(&content)
}
