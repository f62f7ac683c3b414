//! # Runtime Module
//!
//! Process-level concerns for the gallery mirror daemon: configuration
//! loading and the logging/tracing bootstrap.

pub mod config;
pub mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
