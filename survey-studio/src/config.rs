//! CLI configuration

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const CONFIG_DIR: &str = ".survey-studio";

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: Option<String>,
    pub default_format: Option<OutputFormat>,
}

impl Config {
    /// Load `config.toml`, or `config.<profile>.toml`. A missing file is an empty config.
    pub fn load(profile: Option<&str>) -> Result<Self> {
        let path = Self::config_path(profile)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let filename = match profile {
            Some(p) => format!("config.{p}.toml"),
            None => "config.toml".to_string(),
        };
        Ok(config_dir()?.join(filename))
    }
}

/// `~/.survey-studio`
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot find home directory"))?;
    Ok(home.join(CONFIG_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        let config = Config::parse(
            r#"
            api_url = "https://surveys.example.com/api"
            default_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://surveys.example.com/api")
        );
        assert_eq!(config.default_format, Some(OutputFormat::Json));
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_format_is_an_error() {
        assert!(Config::parse(r#"default_format = "yaml""#).is_err());
    }
}
