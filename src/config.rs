use crate::error::{ConfigContext, Result};
use crate::platforms::USERNAME_PLACEHOLDER;
use crate::types::{Config, OsintError};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;
use url::Url;

/// Defaults, then the TOML file if it exists, then environment overrides.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) if path.exists() => {
            let contents = fs::read_to_string(path)
                .config_context(|| format!("Failed to read config file {}", path.display()))?;
            parse_config(&contents)?
        }
        _ => Config::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config)?;

    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).config_context(|| "Failed to parse config file".to_string())
}

fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Ok(timeout) = env::var("OSINTAAM_TIMEOUT") {
        config.timeout_secs = timeout
            .trim()
            .parse()
            .config_context(|| format!("Invalid OSINTAAM_TIMEOUT value {:?}", timeout))?;
    }
    if let Ok(proxy) = env::var("OSINTAAM_PROXY") {
        let proxy = proxy.trim();
        config.proxy = if proxy.is_empty() { None } else { Some(proxy.to_string()) };
    }
    if let Ok(insecure) = env::var("OSINTAAM_INSECURE") {
        if matches!(insecure.trim().to_lowercase().as_str(), "1" | "true" | "yes") {
            config.verify_tls = false;
        }
    }
    Ok(())
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.timeout_secs == 0 {
        return Err(OsintError::ConfigError("Timeout must be greater than 0".to_string()));
    }

    let mut seen = HashSet::new();
    for platform in &config.platforms {
        if platform.name.trim().is_empty() {
            return Err(OsintError::ConfigError("Platform name must not be empty".to_string()));
        }
        if !seen.insert(platform.name.to_lowercase()) {
            return Err(OsintError::ConfigError(format!(
                "Duplicate platform: {}",
                platform.name
            )));
        }

        let sample = platform.url.replace(USERNAME_PLACEHOLDER, "sample");
        let parsed = Url::parse(&sample)
            .config_context(|| format!("Invalid URL template for {}", platform.name))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(OsintError::ConfigError(format!(
                "URL template for {} must use http or https",
                platform.name
            )));
        }
    }

    Ok(())
}
