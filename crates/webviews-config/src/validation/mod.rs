//! Full configuration validation.
//!
//! Collects every range violation into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::WebviewsConfig;
use webviews_common::ConfigError;

use helpers::validate_range;

/// Largest accepted window dimension in logical pixels.
pub const MAX_WINDOW_DIMENSION: u32 = 16384;

/// Largest accepted `timers.min_interval_ms`.
pub const MAX_MIN_INTERVAL_MS: u32 = 60_000;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebviewsConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "window.width",
        config.window.width,
        1,
        MAX_WINDOW_DIMENSION,
    );
    validate_range(
        &mut errors,
        "window.height",
        config.window.height,
        1,
        MAX_WINDOW_DIMENSION,
    );
    validate_range(
        &mut errors,
        "timers.min_interval_ms",
        config.timers.min_interval_ms,
        0,
        MAX_MIN_INTERVAL_MS,
    );

    if let Some(filter) = &config.logging.filter {
        if filter.trim().contains(char::is_whitespace) {
            errors.push(format!("logging.filter = {filter:?} must not contain spaces"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
