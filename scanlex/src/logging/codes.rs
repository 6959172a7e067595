//! Error and success codes with their classification metadata
//!
//! Every error type in the workspace maps its variants onto one of these codes
//! through an `error_code()` method; the registry below is the single place
//! that describes what each code means.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Token definition (builder) error codes
pub mod definition {
    use super::Code;

    pub const DUPLICATE_DEFINITION: Code = Code::new("E001");
    pub const CONFLICTING_DEFINITION: Code = Code::new("E002");
    pub const EMPTY_DEFINITION: Code = Code::new("E003");
    pub const DUPLICATE_QUOTE: Code = Code::new("E004");
    pub const TOO_MANY_DEFINITIONS: Code = Code::new("E005");
}

/// Input stream error codes
pub mod stream {
    use super::Code;

    pub const IO_ERROR: Code = Code::new("E010");
    pub const INVALID_ENCODING: Code = Code::new("E011");
    pub const UNSUPPORTED_EOL: Code = Code::new("E012");
    pub const LINE_TOO_LONG: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E022");
    pub const INVALID_ESCAPE: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const COMMENT_TOO_LONG: Code = Code::new("E026");
}

/// Downstream consumer (document parser) error codes
pub mod syntax {
    use super::Code;

    pub const VALUE_EXPECTED: Code = Code::new("E040");
    pub const INVALID_VALUE: Code = Code::new("E041");
    pub const STRING_EXPECTED: Code = Code::new("E042");
    pub const COLON_EXPECTED: Code = Code::new("E043");
    pub const DELIMITER_EXPECTED: Code = Code::new("E044");
    pub const TRAILING_CONTENT: Code = Code::new("E045");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E046");
}

/// Grammar profile error codes
pub mod profile {
    use super::Code;

    pub const PROFILE_NOT_FOUND: Code = Code::new("E060");
    pub const PROFILE_INVALID: Code = Code::new("E061");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const TOKENIZER_BUILT: Code = Code::new("I010");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const TOKEN_LIST_COLLECTED: Code = Code::new("I021");

    pub const DOCUMENT_PARSED: Code = Code::new("I040");

    pub const PROFILE_LOADED: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const METADATA: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check runtime configuration and environment variables",
    ),
    // Definitions
    ErrorMetadata::new(
        "E001",
        "Definition",
        Severity::Low,
        true,
        false,
        "Token definition already exists",
        "Remove the repeated definition; the first one stays in effect",
    ),
    ErrorMetadata::new(
        "E002",
        "Definition",
        Severity::Medium,
        true,
        false,
        "Literal already defined with a different token class",
        "Give each literal exactly one class (atom, blank or comment marker)",
    ),
    ErrorMetadata::new(
        "E003",
        "Definition",
        Severity::Medium,
        true,
        false,
        "Empty token definition",
        "Token literals must contain at least one character",
    ),
    ErrorMetadata::new(
        "E004",
        "Definition",
        Severity::Low,
        true,
        false,
        "Quote character already defined",
        "Define each quote character once",
    ),
    ErrorMetadata::new(
        "E005",
        "Definition",
        Severity::Medium,
        true,
        false,
        "Definition set exceeds its compile-time limit",
        "Reduce the number of definitions or raise max_definitions",
    ),
    // Stream
    ErrorMetadata::new(
        "E010",
        "Stream",
        Severity::High,
        false,
        true,
        "Input stream read failure",
        "Check that the input is readable and not truncated",
    ),
    ErrorMetadata::new(
        "E011",
        "Stream",
        Severity::High,
        false,
        true,
        "Input is not valid UTF-8",
        "Convert the input to UTF-8 before scanning",
    ),
    ErrorMetadata::new(
        "E012",
        "Stream",
        Severity::High,
        false,
        true,
        "Line terminator not enabled in the configuration",
        "Enable the terminator with def_eol or normalize the input",
    ),
    ErrorMetadata::new(
        "E013",
        "Stream",
        Severity::High,
        false,
        true,
        "Line exceeds maximum length",
        "Split the line or raise max_line_length",
    ),
    // Lexical
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        true,
        "Unterminated string literal",
        "Close the string with its quote character on the same line",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        true,
        "Unterminated multi-line comment",
        "Add the comment end marker",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::High,
        false,
        true,
        "Malformed escape sequence in string literal",
        "Use a recognized escape or disable escapes for this quote",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::High,
        false,
        true,
        "String literal exceeds maximum size",
        "Shorten the literal or raise max_string_size",
    ),
    ErrorMetadata::new(
        "E026",
        "Lexical",
        Severity::High,
        false,
        true,
        "Comment exceeds maximum length",
        "Shorten the comment or raise max_comment_length",
    ),
    // Syntax
    ErrorMetadata::new(
        "E040",
        "Syntax",
        Severity::High,
        false,
        false,
        "Value expected",
        "Supply an object, array, string, number or literal",
    ),
    ErrorMetadata::new(
        "E041",
        "Syntax",
        Severity::High,
        false,
        false,
        "Invalid value",
        "Check the spelling of literals and numbers",
    ),
    ErrorMetadata::new(
        "E042",
        "Syntax",
        Severity::High,
        false,
        false,
        "String expected",
        "Object keys must be quoted strings",
    ),
    ErrorMetadata::new(
        "E043",
        "Syntax",
        Severity::High,
        false,
        false,
        "':' expected",
        "Separate keys and values with a colon",
    ),
    ErrorMetadata::new(
        "E044",
        "Syntax",
        Severity::High,
        false,
        false,
        "Delimiter expected",
        "Check for a missing comma or closing bracket",
    ),
    ErrorMetadata::new(
        "E045",
        "Syntax",
        Severity::Medium,
        false,
        false,
        "Content after the document root",
        "Remove trailing content",
    ),
    ErrorMetadata::new(
        "E046",
        "Syntax",
        Severity::High,
        false,
        true,
        "Maximum nesting depth exceeded",
        "Flatten the document or raise max_parse_depth",
    ),
    // Profile
    ErrorMetadata::new(
        "E060",
        "Profile",
        Severity::High,
        false,
        true,
        "Grammar profile not found",
        "Check the profile path",
    ),
    ErrorMetadata::new(
        "E061",
        "Profile",
        Severity::High,
        false,
        true,
        "Grammar profile is invalid",
        "Fix the TOML syntax or the definition it rejects",
    ),
    // Success
    ErrorMetadata::new(
        "I004",
        "System",
        Severity::Low,
        true,
        false,
        "System initialization completed",
        "Continue normal operation",
    ),
    ErrorMetadata::new(
        "I010",
        "Definition",
        Severity::Low,
        true,
        false,
        "Tokenizer built from definitions",
        "Start scanning",
    ),
    ErrorMetadata::new(
        "I020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Tokenization reached end of input",
        "Continue to downstream consumer",
    ),
    ErrorMetadata::new(
        "I021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Token list collected",
        "Continue to downstream consumer",
    ),
    ErrorMetadata::new(
        "I040",
        "Syntax",
        Severity::Low,
        true,
        false,
        "Document parsed",
        "Continue normal operation",
    ),
    ErrorMetadata::new(
        "I060",
        "Profile",
        Severity::Low,
        true,
        false,
        "Grammar profile loaded",
        "Continue normal operation",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            definition::DUPLICATE_DEFINITION,
            definition::CONFLICTING_DEFINITION,
            definition::EMPTY_DEFINITION,
            definition::DUPLICATE_QUOTE,
            definition::TOO_MANY_DEFINITIONS,
            stream::IO_ERROR,
            stream::INVALID_ENCODING,
            stream::UNSUPPORTED_EOL,
            stream::LINE_TOO_LONG,
            lexical::UNTERMINATED_STRING,
            lexical::UNTERMINATED_COMMENT,
            lexical::INVALID_ESCAPE,
            lexical::STRING_TOO_LARGE,
            lexical::COMMENT_TOO_LONG,
            syntax::VALUE_EXPECTED,
            syntax::INVALID_VALUE,
            syntax::STRING_EXPECTED,
            syntax::COLON_EXPECTED,
            syntax::DELIMITER_EXPECTED,
            syntax::TRAILING_CONTENT,
            syntax::MAX_RECURSION_DEPTH,
            profile::PROFILE_NOT_FOUND,
            profile::PROFILE_INVALID,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::TOKENIZER_BUILT,
            success::TOKENIZATION_COMPLETE,
            success::TOKEN_LIST_COLLECTED,
            success::DOCUMENT_PARSED,
            success::PROFILE_LOADED,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_codes_are_unique() {
        assert_eq!(get_error_registry().len(), METADATA.len());
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E022"), "Lexical");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(requires_halt("E023"));
        assert!(is_recoverable("E001"));
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert!(!requires_halt("Z999"));
    }
}
