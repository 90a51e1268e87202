// src/logging.rs
//! Logger capability handed to the gateway and the aggregator.
//!
//! Components never touch the global `log` facade directly. The binary wires
//! in [`LogFacade`], which forwards to whatever `env_logger` set up, while
//! tests use [`NullLogger`] or their own recording sink.

use log::Level;
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards every line to the `log` crate under the given target.
#[derive(Debug, Clone)]
pub struct LogFacade {
    target: &'static str,
}

impl LogFacade {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

pub fn null_logger() -> Arc<dyn Logger> {
    Arc::new(NullLogger)
}
