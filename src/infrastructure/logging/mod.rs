//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON output on stderr
//! - Optional daily rolling JSON log files

pub mod logger;

pub use logger::{LogFormat, LoggerImpl};
