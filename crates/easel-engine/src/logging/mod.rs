//! Logging utilities.
//!
//! Everything in the engine logs through the `log` facade; this module only
//! owns the one-time `env_logger` setup.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
