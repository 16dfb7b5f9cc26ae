//! Logging utilities.
//!
//! Centralizes logger initialization. The engine itself only logs through the
//! `log` facade; the backend is configured here.

mod init;

pub use init::{init_logging, LoggingConfig};
