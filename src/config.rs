use std::path::{Path, PathBuf};

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PORT: u16 = 8006;

/// Optional settings read from ~/.config/ytsum/config.toml
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    pub default_lang: Option<String>,
    pub model: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: FileConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(FileConfig::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}

/// Fully-resolved runtime configuration, constructed once at startup and
/// passed into each provider. A missing API key fails here, not on first use.
#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: String,
    pub gemini_api_key: String,
    pub default_lang: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn load(config_file: Option<&Path>, port_flag: Option<u16>) -> Result<Self> {
        let path = config_file.map(Path::to_path_buf).unwrap_or_else(config_path);
        let file = FileConfig::load(&path)?;

        let youtube_api_key = require_env("YOUTUBE_API_KEY")?;
        let gemini_api_key = require_env("GEMINI_API_KEY")?;

        let port = port_flag
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        Ok(Config {
            youtube_api_key,
            gemini_api_key,
            default_lang: file.default_lang.unwrap_or_else(|| DEFAULT_LANG.to_string()),
            model: file.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| eyre::eyre!("{name} environment variable not set (API keys are required at startup)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
default_lang = "es"
model = "gemini-1.5-pro"
port = 9000
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("es"));
        assert_eq!(config.model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.port, Some(9000));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.default_lang.is_none());
        assert!(config.model.is_none());
        assert!(config.port.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: FileConfig = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("fr"));
        assert!(config.model.is_none());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = FileConfig::load(Path::new("/nonexistent/ytsum/config.toml")).unwrap();
        assert!(config.port.is_none());
    }
}
