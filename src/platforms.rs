// src/platforms.rs
use crate::types::{Config, OsintError, Platform};

pub const USERNAME_PLACEHOLDER: &str = "{username}";

impl Platform {
    /// Fills the template with the percent-encoded username.
    pub fn profile_url(&self, username: &str) -> String {
        self.url
            .replace(USERNAME_PLACEHOLDER, &urlencoding::encode(username))
    }
}

/// Platforms checked by the username search, in check order.
pub fn get_all_platforms(config: &Config) -> &[Platform] {
    &config.platforms
}

pub fn find_platform<'a>(config: &'a Config, name: &str) -> Option<&'a Platform> {
    config
        .platforms
        .iter()
        .find(|platform| platform.name.eq_ignore_ascii_case(name))
}

/// Narrows the table to the named platforms, keeping table order.
pub fn select_platforms(config: &Config, names: &[String]) -> Result<Vec<Platform>, OsintError> {
    for name in names {
        if find_platform(config, name).is_none() {
            return Err(OsintError::ConfigError(format!("Unknown platform: {}", name)));
        }
    }

    Ok(get_all_platforms(config)
        .iter()
        .filter(|platform| names.iter().any(|name| platform.name.eq_ignore_ascii_case(name)))
        .cloned()
        .collect())
}
