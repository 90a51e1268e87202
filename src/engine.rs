use crate::error::Result;
use crate::gateway::{Fetch, Gateway, GatewayResponse};
use crate::logging::Logger;
use crate::output;
use crate::types::{
    Category, Config, Coverage, DomainReport, EmailReport, ExportFormat, MonitoringStatus,
    PhoneReport, Platform, PlatformOutcome, PlatformOutcomes, Query, SearchResult, TorMonitoring,
    TorReport, UsernameReport,
};
use std::path::Path;
use std::sync::Arc;

const EMAIL_SOURCES: [&str; 2] = ["HaveIBeenPwned", "Public Breach Databases"];
const DOMAIN_SOURCES: [&str; 2] = ["Public DNS", "Domain Registry"];
const PHONE_SOURCES: [&str; 2] = ["Public breach databases", "Registered leak sites"];
const TOR_SOURCES: [&str; 3] = [
    "Threat Intelligence Feeds",
    "Public Forum Monitoring",
    "Leak Database Aggregators",
];
const TOR_LEGAL_NOTICE: &str = "This data comes from publicly available monitoring services only";

/// Builds one record per intelligence category and keeps the latest one.
///
/// Every record produced by an engine carries the timestamp fixed when the
/// engine was created.
pub struct OsintEngine {
    gateway: Arc<dyn Fetch>,
    logger: Arc<dyn Logger>,
    platforms: Vec<Platform>,
    timeout_secs: u64,
    search_timestamp: String,
    results: Option<SearchResult>,
}

impl OsintEngine {
    pub fn new(config: &Config, logger: Arc<dyn Logger>) -> Result<Self> {
        let gateway = Gateway::new(config, logger.clone())?;
        Ok(Self::with_gateway(config, Arc::new(gateway), logger))
    }

    pub fn with_gateway(config: &Config, gateway: Arc<dyn Fetch>, logger: Arc<dyn Logger>) -> Self {
        Self {
            gateway,
            logger,
            platforms: config.platforms.clone(),
            timeout_secs: config.timeout_secs,
            search_timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            results: None,
        }
    }

    pub fn search_date(&self) -> &str {
        &self.search_timestamp
    }

    pub fn results(&self) -> Option<&SearchResult> {
        self.results.as_ref()
    }

    /// Runs one category search and stores its record, replacing the previous one.
    pub async fn run(&mut self, query: &Query) -> &SearchResult {
        self.logger
            .info(&format!("Starting {} search for: {}", query.category, query.target));

        let result = match query.category {
            Category::Email => self.search_email_breach(&query.target),
            Category::Username => self.search_username(&query.target).await,
            Category::Domain => self.search_domain_info(&query.target),
            Category::Phone => self.search_phone_breach(&query.target),
            Category::Tor => self.search_tor_monitoring(&query.target),
        };

        self.results.insert(result)
    }

    pub fn search_email_breach(&self, email: &str) -> SearchResult {
        self.logger.info(&format!("Searching for email breaches: {}", email));
        let report = EmailReport {
            email: email.to_string(),
            breaches: Vec::new(),
            search_date: self.search_timestamp.clone(),
            sources: to_strings(&EMAIL_SOURCES),
            coverage: Coverage::NotImplementedSource,
        };
        self.logger.info("Email breach search completed using public sources");
        SearchResult::Email(report)
    }

    /// Checks each platform in table order, one request at a time. Request
    /// failures are recorded per platform and never abort the search.
    pub async fn search_username(&self, username: &str) -> SearchResult {
        self.logger.info(&format!("Searching for username: {}", username));
        let mut platforms = PlatformOutcomes::new();

        for platform in &self.platforms {
            self.logger.info(&format!("Checking {}...", platform.name));
            let url = platform.profile_url(username);

            let outcome = match self.gateway.fetch(&url, self.timeout_secs).await {
                GatewayResponse::Success { code, .. } => PlatformOutcome::found(url, code),
                GatewayResponse::Error { error } => PlatformOutcome::failed(error.to_string()),
            };
            platforms.insert(platform.name.clone(), outcome);
        }

        let found = platforms.iter().filter(|(_, outcome)| outcome.found).count();
        self.logger.info(&format!(
            "Username search completed: found on {}/{} platforms",
            found,
            platforms.len()
        ));

        SearchResult::Username(UsernameReport {
            username: username.to_string(),
            platforms,
            search_date: self.search_timestamp.clone(),
            coverage: Coverage::Live,
        })
    }

    pub fn search_domain_info(&self, domain: &str) -> SearchResult {
        self.logger.info(&format!("Searching domain information: {}", domain));
        let report = DomainReport {
            domain: domain.to_string(),
            information: serde_json::Map::new(),
            search_date: self.search_timestamp.clone(),
            sources: to_strings(&DOMAIN_SOURCES),
            coverage: Coverage::NotImplementedSource,
        };
        self.logger.info("Domain search completed using public sources");
        SearchResult::Domain(report)
    }

    pub fn search_phone_breach(&self, phone: &str) -> SearchResult {
        self.logger.info(&format!("Searching for phone in breaches: {}", phone));
        let report = PhoneReport {
            phone: phone.to_string(),
            breaches_found: false,
            sources_checked: to_strings(&PHONE_SOURCES),
            search_date: self.search_timestamp.clone(),
            coverage: Coverage::NotImplementedSource,
        };
        self.logger.info("Phone number search completed with available public sources");
        SearchResult::Phone(report)
    }

    pub fn search_tor_monitoring(&self, query: &str) -> SearchResult {
        self.logger
            .info(&format!("Monitoring public Tor-related sources for: {}", query));
        let report = TorReport {
            query: query.to_string(),
            tor_monitoring: TorMonitoring {
                status: MonitoringStatus::Monitored,
                sources: to_strings(&TOR_SOURCES),
                findings: Vec::new(),
            },
            search_date: self.search_timestamp.clone(),
            legal_notice: TOR_LEGAL_NOTICE.to_string(),
            coverage: Coverage::NotImplementedSource,
        };
        self.logger.info("Tor monitoring completed using legitimate aggregators");
        SearchResult::Tor(report)
    }

    pub fn export_results(&self, format: ExportFormat) -> Result<String> {
        output::render(self.results.as_ref(), format, &self.search_timestamp)
    }

    /// Writes the export to `path`. Failures are logged, not returned.
    pub fn save_results(&self, path: &Path, format: ExportFormat) -> bool {
        let written = self
            .export_results(format)
            .and_then(|content| output::write_to_file(path, &content));

        match written {
            Ok(()) => {
                self.logger
                    .info(&format!("Results saved to {}", path.display()));
                true
            }
            Err(e) => {
                self.logger.error(&format!("Could not save results: {}", e));
                false
            }
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
