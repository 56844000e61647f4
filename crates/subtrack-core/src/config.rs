//! CLI configuration
//!
//! The gateway URL is resolved in priority order:
//! 1. `--api` flag
//! 2. `SUBTRACK_API_URL` environment variable
//! 3. `config.toml` in the platform config directory
//! 4. built-in local default

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Environment variable overriding the gateway URL
pub const API_URL_ENV: &str = "SUBTRACK_API_URL";

/// Gateway used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Contents of `config.toml`, all keys optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Persistence gateway URL
    pub api_url: Option<String>,
    /// Advisor generate-endpoint host
    pub advisor_host: Option<String>,
    /// Model requested from the advisor
    pub advisor_model: Option<String>,
}

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("subtrack").join("config.toml"))
}

/// Load configuration from a file, or the default location when `path`
/// is `None`. A missing file yields an empty config.
pub fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    let resolved = match path {
        Some(p) => Some(p.clone()),
        None => default_config_path(),
    };

    match resolved {
        Some(p) if p.exists() => {
            let content = fs::read_to_string(&p)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?;
            parse_config(&content)
        }
        _ => Ok(FileConfig::default()),
    }
}

fn parse_config(content: &str) -> Result<FileConfig> {
    toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))
}

/// Resolve the gateway URL: flag beats env beats file beats default
pub fn resolve_api_url(flag: Option<&str>, file: &FileConfig) -> String {
    if let Some(url) = flag {
        return url.to_string();
    }
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }
    if let Some(url) = &file.api_url {
        return url.clone();
    }
    DEFAULT_API_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
api_url = "https://gateway.example.com/exec"
advisor_host = "http://localhost:11434"
advisor_model = "llama3.2"
"#,
        )
        .unwrap();

        assert_eq!(
            config.api_url.as_deref(),
            Some("https://gateway.example.com/exec")
        );
        assert_eq!(config.advisor_host.as_deref(), Some("http://localhost:11434"));
        assert_eq!(config.advisor_model.as_deref(), Some("llama3.2"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.api_url.is_none());
        assert!(config.advisor_host.is_none());
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = parse_config("api_url = [not toml");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_yields_empty_config() {
        let path = PathBuf::from("/nonexistent/subtrack/config.toml");
        let config = load_file_config(Some(&path)).unwrap();
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_url = \"http://example.com\"").unwrap();

        let config = load_file_config(Some(&path)).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://example.com"));
    }

    #[test]
    fn test_url_resolution_order() {
        // Single test so the environment mutation cannot race a
        // parallel assertion on the default.
        let empty = FileConfig::default();
        let file = FileConfig {
            api_url: Some("http://from-file".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_api_url(None, &empty), DEFAULT_API_URL);
        assert_eq!(resolve_api_url(None, &file), "http://from-file");

        std::env::set_var(API_URL_ENV, "http://from-env");
        assert_eq!(resolve_api_url(None, &file), "http://from-env");
        assert_eq!(
            resolve_api_url(Some("http://from-flag"), &file),
            "http://from-flag"
        );
        std::env::remove_var(API_URL_ENV);
    }
}
