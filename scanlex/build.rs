// build.rs - TOML-driven constant generation for scanner limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    syntax: SyntaxLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_line_length: usize,
    max_string_size: usize,
    max_comment_length: usize,
    max_definitions: usize,
}

#[derive(serde::Deserialize)]
struct SyntaxLimits {
    max_parse_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SCANLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=SCANLEX_CONFIG_DIR");

    let profile = env::var("SCANLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("SCANLEX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the scanlex directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_LINE_LENGTH: usize = 64 * 1024 * 1024;
    const ABSOLUTE_MAX_PARSE_DEPTH: usize = 10_000;

    if config.lexical.max_line_length == 0 || config.lexical.max_line_length > ABSOLUTE_MAX_LINE_LENGTH
    {
        panic!("SECURITY: max_line_length must be in 1..={}", ABSOLUTE_MAX_LINE_LENGTH);
    }

    if config.lexical.max_string_size == 0 || config.lexical.max_comment_length == 0 {
        panic!("SECURITY: string and comment limits cannot be zero");
    }

    if config.lexical.max_string_size.saturating_add(2) > config.lexical.max_line_length {
        panic!("max_string_size plus its quotes must fit in max_line_length");
    }

    if config.lexical.max_definitions == 0 {
        panic!("max_definitions cannot be zero");
    }

    if config.syntax.max_parse_depth == 0 || config.syntax.max_parse_depth > ABSOLUTE_MAX_PARSE_DEPTH
    {
        panic!("SECURITY: max_parse_depth must be in 1..={}", ABSOLUTE_MAX_PARSE_DEPTH);
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if config.logging.log_buffer_size < 100 {
        panic!("log_buffer_size too small (min: 100)");
    }

    if profile == "production" && config.lexical.max_line_length > 1024 * 1024 {
        panic!("PRODUCTION: max_line_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_LINE_LENGTH: usize = {};
        pub const MAX_STRING_SIZE: usize = {};
        pub const MAX_COMMENT_LENGTH: usize = {};
        pub const MAX_DEFINITIONS: usize = {};
    }}

    pub mod syntax {{
        pub const MAX_PARSE_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Lexical
        config.lexical.max_line_length,
        config.lexical.max_string_size,
        config.lexical.max_comment_length,
        config.lexical.max_definitions,
        // Syntax
        config.syntax.max_parse_depth,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
