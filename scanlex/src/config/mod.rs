//! Configuration module for the scanner
//! Compile-time limits are generated from TOML by build.rs

// Generated at compile time from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{LogLevel, LoggingPreferences, TokenizerPreferences};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SCANLEX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SCANLEX_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time::{lexical, logging, syntax};
    use super::*;

    #[test]
    fn test_generated_limits_are_positive() {
        assert!(lexical::MAX_LINE_LENGTH > 0);
        assert!(lexical::MAX_STRING_SIZE > 0);
        assert!(lexical::MAX_COMMENT_LENGTH > 0);
        assert!(lexical::MAX_DEFINITIONS > 0);
        assert!(syntax::MAX_PARSE_DEPTH > 0);
        assert!(logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
