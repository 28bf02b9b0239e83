use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::{Settings, TOKEN_ENV};

/// Static, secret-free part of the configuration file.
#[derive(Deserialize)]
struct StaticConfig {
    api_url: String,
    #[serde(default)]
    default_path: Option<String>,
}

/// Loads the static YAML config file and injects the bearer token from the
/// environment. A missing token is not a load error: it surfaces later as
/// `AuthMissing` when an upload is attempted.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let static_conf: StaticConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if static_conf.api_url.is_empty() {
        error!("api_url missing from config");
        anyhow::bail!("api_url must be set in the config file");
    }

    let token = match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.is_empty() => {
            info!(token_len = token.len(), "{TOKEN_ENV} found in env");
            Some(token)
        }
        _ => {
            warn!("{TOKEN_ENV} not set; uploads will fail until a token is configured");
            None
        }
    };

    let settings = Settings {
        api_url: static_conf.api_url,
        default_path: static_conf.default_path,
        token,
    };
    settings.trace_loaded();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_yaml_and_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://localhost:8001").unwrap();
        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.api_url, "http://localhost:8001");
        assert!(settings.default_path.is_none());
    }

    #[test]
    fn loads_default_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://localhost:8001").unwrap();
        writeln!(file, "default_path: notes").unwrap();
        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.default_path.as_deref(), Some("notes"));
    }

    #[test]
    fn rejects_missing_api_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_path: notes").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn rejects_unreadable_file() {
        assert!(load_config("/nonexistent/notesync.yaml").is_err());
    }
}
