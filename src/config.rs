// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::DOCKERHUB_API_URL;

const ENV_API_URL: &str = "DOCKERHUB_API_URL";
const ENV_TIMEOUT: &str = "DOCKERHUB_TIMEOUT_SECS";
const DEFAULT_CONFIG_PATH: &str = "config/dockerhub.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DOCKERHUB_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Deserialize)]
struct TomlCfg {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Load client settings from an explicit TOML file. Missing keys fall back
/// to the defaults.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading client config from {}", path.display()))?;
    let parsed: TomlCfg = toml::from_str(&content)
        .with_context(|| format!("parsing client config from {}", path.display()))?;

    let defaults = ClientConfig::default();
    Ok(ClientConfig {
        api_url: parsed.api_url.unwrap_or(defaults.api_url),
        timeout_secs: parsed.timeout_secs.unwrap_or(defaults.timeout_secs),
    })
}

/// Resolve client settings:
/// 1) config/dockerhub.toml, when present
/// 2) $DOCKERHUB_API_URL / $DOCKERHUB_TIMEOUT_SECS override individual values
/// 3) built-in defaults for the rest
pub fn load_default() -> Result<ClientConfig> {
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut cfg = if path.exists() {
        load_from(&path)?
    } else {
        ClientConfig::default()
    };

    if let Ok(url) = std::env::var(ENV_API_URL) {
        if url.trim().is_empty() {
            return Err(anyhow!("DOCKERHUB_API_URL is set but empty"));
        }
        cfg.api_url = url;
    }
    if let Ok(timeout) = std::env::var(ENV_TIMEOUT) {
        cfg.timeout_secs = timeout
            .parse()
            .context("parsing DOCKERHUB_TIMEOUT_SECS")?;
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn file_values_override_defaults_per_key() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("dockerhub.toml");
        fs::write(&p, r#"timeout_secs = 5"#).unwrap();

        let cfg = load_from(&p).unwrap();
        assert_eq!(cfg.api_url, DOCKERHUB_API_URL);
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_win_over_file_and_defaults() {
        // Isolate CWD in a temp dir so a real config/ in the repo can't leak in.
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_TIMEOUT);

        // No file, no env: defaults.
        let cfg = load_default().unwrap();
        assert_eq!(cfg, ClientConfig::default());

        fs::create_dir_all("config").unwrap();
        fs::write("config/dockerhub.toml", r#"api_url = "http://mirror/v2""#).unwrap();
        let cfg = load_default().unwrap();
        assert_eq!(cfg.api_url, "http://mirror/v2");

        env::set_var(ENV_API_URL, "http://localhost:1234/v2");
        env::set_var(ENV_TIMEOUT, "7");
        let cfg = load_default().unwrap();
        assert_eq!(cfg.api_url, "http://localhost:1234/v2");
        assert_eq!(cfg.timeout_secs, 7);

        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_TIMEOUT);
        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn empty_env_url_is_rejected() {
        env::set_var(ENV_API_URL, "");
        let res = load_default();
        env::remove_var(ENV_API_URL);
        assert!(res.is_err());
    }
}
