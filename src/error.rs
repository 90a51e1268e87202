pub use crate::types::OsintError;

pub type Result<T> = std::result::Result<T, OsintError>;

/// Wraps a failure met while loading or validating configuration into
/// `OsintError::ConfigError`, prefixed with what was being attempted.
pub trait ConfigContext<T> {
    fn config_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ConfigContext<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn config_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| OsintError::ConfigError(format!("{}: {}", f(), e)))
    }
}
