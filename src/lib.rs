// src/lib.rs
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod output;
pub mod platforms;
pub mod types;

pub use cli::Args;
pub use engine::OsintEngine;
pub use gateway::{Fetch, Gateway, GatewayError, GatewayResponse};
pub use logging::{LogFacade, Logger, NullLogger};
pub use types::{Config, ExportFormat, OsintError, PlatformOutcome, Query, SearchResult};
