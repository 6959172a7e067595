//! Logging configuration: compile-time bounds plus runtime preferences
//!
//! Security boundaries come from the generated constants and cannot be
//! changed at runtime. User preferences are set once per process.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; only the first call takes effect
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

pub fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Minimum log level for `preferences`, never stricter than the
/// compile-time security level
pub fn effective_log_level(preferences: &LoggingPreferences) -> EventsLogLevel {
    let user_level = preferences.min_log_level.to_events_log_level();
    let security_level = get_security_log_level();

    if user_level < security_level {
        security_level
    } else {
        user_level
    }
}

pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn include_positions() -> bool {
    get_runtime_preferences().include_positions
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 1_000_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Max log message length cannot be zero".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_min_level_respects_security_floor() {
        let mut preferences = LoggingPreferences::default();
        preferences.min_log_level = crate::config::runtime::LogLevel::Error;
        assert!(effective_log_level(&preferences) >= get_security_log_level());

        preferences.min_log_level = crate::config::runtime::LogLevel::Debug;
        assert_eq!(effective_log_level(&preferences), EventsLogLevel::Debug);
    }

    #[test]
    fn test_security_level_never_hides_warnings() {
        assert!(get_security_log_level() >= EventsLogLevel::Warning);
    }
}
