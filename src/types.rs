// src/types.rs
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub verify_tls: bool,
    pub proxy: Option<String>,
    pub platforms: Vec<Platform>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: BROWSER_USER_AGENT.to_string(),
            verify_tls: true,
            proxy: None,
            platforms: vec![
                Platform::new("github", "https://api.github.com/users/{username}"),
                Platform::new("linkedin", "https://www.linkedin.com/in/{username}"),
            ],
        }
    }
}

/// A service checked by the username search. `url` is a template holding a
/// `{username}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub url: String,
}

impl Platform {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
}

impl ExportFormat {
    /// Unknown names fall back to JSON.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "txt" => ExportFormat::Txt,
            _ => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Email,
    Username,
    Domain,
    Phone,
    Tor,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Email => "email",
            Category::Username => "username",
            Category::Domain => "domain",
            Category::Phone => "phone",
            Category::Tor => "Tor monitoring",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub category: Category,
    pub target: String,
}

impl Query {
    pub fn new(category: Category, target: impl Into<String>) -> Self {
        Self {
            category,
            target: target.into(),
        }
    }
}

/// Whether a record was produced by a live lookup or by a source that has no
/// integration yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Live,
    NotImplementedSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOutcome {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlatformOutcome {
    pub fn found(url: String, status_code: u16) -> Self {
        Self {
            found: true,
            url: Some(url),
            status_code: Some(status_code),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            found: false,
            url: None,
            status_code: None,
            error: Some(error),
        }
    }
}

/// Platform outcomes keyed by platform name, kept in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformOutcomes(Vec<(String, PlatformOutcome)>);

impl PlatformOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the outcome in place when the platform is already present.
    pub fn insert(&mut self, name: String, outcome: PlatformOutcome) {
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = outcome,
            None => self.0.push((name, outcome)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlatformOutcome> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlatformOutcome)> {
        self.0.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PlatformOutcomes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, outcome) in &self.0 {
            map.serialize_entry(name, outcome)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlatformOutcomes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OutcomesVisitor;

        impl<'de> Visitor<'de> for OutcomesVisitor {
            type Value = PlatformOutcomes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of platform name to outcome")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut outcomes = PlatformOutcomes::new();
                while let Some((name, outcome)) = access.next_entry::<String, PlatformOutcome>()? {
                    outcomes.insert(name, outcome);
                }
                Ok(outcomes)
            }
        }

        deserializer.deserialize_map(OutcomesVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailReport {
    pub email: String,
    pub breaches: Vec<Value>,
    pub search_date: String,
    pub sources: Vec<String>,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsernameReport {
    pub username: String,
    pub platforms: PlatformOutcomes,
    pub search_date: String,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub information: serde_json::Map<String, Value>,
    pub search_date: String,
    pub sources: Vec<String>,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneReport {
    pub phone: String,
    pub breaches_found: bool,
    pub sources_checked: Vec<String>,
    pub search_date: String,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitoringStatus {
    Monitored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorMonitoring {
    pub status: MonitoringStatus,
    pub sources: Vec<String>,
    pub findings: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorReport {
    pub query: String,
    pub tor_monitoring: TorMonitoring,
    pub search_date: String,
    pub legal_notice: String,
    pub coverage: Coverage,
}

/// One category record. Serialized without a tag, so the top-level keys are
/// the record's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResult {
    Email(EmailReport),
    Username(UsernameReport),
    Domain(DomainReport),
    Phone(PhoneReport),
    Tor(TorReport),
}

impl SearchResult {
    pub fn category(&self) -> Category {
        match self {
            SearchResult::Email(_) => Category::Email,
            SearchResult::Username(_) => Category::Username,
            SearchResult::Domain(_) => Category::Domain,
            SearchResult::Phone(_) => Category::Phone,
            SearchResult::Tor(_) => Category::Tor,
        }
    }

    pub fn search_date(&self) -> &str {
        match self {
            SearchResult::Email(r) => &r.search_date,
            SearchResult::Username(r) => &r.search_date,
            SearchResult::Domain(r) => &r.search_date,
            SearchResult::Phone(r) => &r.search_date,
            SearchResult::Tor(r) => &r.search_date,
        }
    }
}

#[derive(Debug, Error)]
pub enum OsintError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
