//! Diagnostic logging
//!
//! Events go to stderr so they never mix with the menus on stdout.

use crate::error::{Result, TimetableError};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Parse a level filter such as `warn`, `debug` or `off`
pub fn parse_level(level_filter: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level_filter)
        .map_err(|e| TimetableError::Config(format!("log level '{}': {}", level_filter, e)))
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init(display_level: &bool, level_filter: &str) -> Result<()> {
    let level_filter = parse_level(level_filter)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_level(*display_level)
        .with_target(false)
        .with_max_level(level_filter)
        .try_init()
        .map_err(|e| TimetableError::Config(format!("log subscriber: {}", e)))
}
