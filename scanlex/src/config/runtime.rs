// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerPreferences {
    /// Whether to count tokens per class while scanning
    pub collect_metrics: bool,

    /// Whether to emit a debug event for every produced token
    pub trace_tokens: bool,

    /// Whether to log a success event once end of input is reached
    pub log_completion: bool,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env::var("SCANLEX_TOKENIZER_COLLECT_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            trace_tokens: env::var("SCANLEX_TOKENIZER_TRACE_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_completion: env::var("SCANLEX_TOKENIZER_LOG_COMPLETION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Preferred minimum log level (within security constraints)
    pub min_log_level: LogLevel,

    /// Whether events carry the source position they refer to
    pub include_positions: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("SCANLEX_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("SCANLEX_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("SCANLEX_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_positions: env::var("SCANLEX_LOGGING_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Tokenizer
    pub const TOKENIZER_COLLECT_METRICS: &str = "SCANLEX_TOKENIZER_COLLECT_METRICS";
    pub const TOKENIZER_TRACE_TOKENS: &str = "SCANLEX_TOKENIZER_TRACE_TOKENS";
    pub const TOKENIZER_LOG_COMPLETION: &str = "SCANLEX_TOKENIZER_LOG_COMPLETION";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCANLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCANLEX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCANLEX_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_POSITIONS: &str = "SCANLEX_LOGGING_INCLUDE_POSITIONS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Warning.as_str(), "WARN");
    }

    #[test]
    fn test_preferences_round_trip_through_json() {
        let preferences = TokenizerPreferences {
            collect_metrics: false,
            trace_tokens: true,
            log_completion: false,
        };

        let json = serde_json::to_string(&preferences).unwrap();
        let parsed: TokenizerPreferences = serde_json::from_str(&json).unwrap();
        assert!(parsed.trace_tokens);
        assert!(!parsed.collect_metrics);
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        for name in [
            env_vars::TOKENIZER_COLLECT_METRICS,
            env_vars::TOKENIZER_TRACE_TOKENS,
            env_vars::LOGGING_MIN_LEVEL,
            env_vars::LOGGING_INCLUDE_POSITIONS,
        ] {
            assert!(name.starts_with("SCANLEX_"));
        }
    }
}
