//! Grammar profiles: tokenizer definitions loaded from TOML
//!
//! ```toml
//! atoms = ["(", ")", "->"]
//! blanks = [" ", "\t"]
//! single_line_comments = ["//"]
//! multi_line_comments = [["/*", "*/"]]
//! eol = ["cr_lf", "lf"]
//!
//! [[strings]]
//! quote = "\""
//! escape = "\\"
//! ```

use scanlex::logging::{codes, Code};
use scanlex::{DefinitionError, Eol, EscapeConverter, StdEscapeConverter, TokenizerBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("cannot read profile {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("profile rejected: {0}")]
    Definition(#[from] DefinitionError),
}

impl ProfileError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::NotFound { .. } => codes::profile::PROFILE_NOT_FOUND,
            Self::Io { .. } | Self::Parse { .. } => codes::profile::PROFILE_INVALID,
            Self::Definition(e) => e.error_code(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringProfile {
    pub quote: char,
    /// Escape prefix; omitted means escapes are disabled for this quote
    #[serde(default)]
    pub escape: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrammarProfile {
    pub atoms: Vec<String>,
    pub blanks: Vec<String>,
    pub single_line_comments: Vec<String>,
    pub multi_line_comments: Vec<(String, String)>,
    pub eol: Vec<Eol>,
    pub strings: Vec<StringProfile>,
}

impl GrammarProfile {
    /// C-like grammar used when no profile is given
    pub fn c_like() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            atoms: owned(&["(", ")", ">", "->", ">=", ";", "<<"]),
            blanks: owned(&[" ", "\t"]),
            single_line_comments: owned(&["//", "#"]),
            multi_line_comments: vec![("/*".to_string(), "*/".to_string())],
            eol: vec![Eol::CrLf, Eol::Lf],
            strings: vec![StringProfile {
                quote: '"',
                escape: Some('\\'),
            }],
        }
    }

    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ProfileError> {
        toml::from_str(text).map_err(|e| ProfileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            return Err(ProfileError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Feed every definition to a fresh builder, in profile order
    pub fn to_builder(&self) -> Result<TokenizerBuilder, ProfileError> {
        let mut builder = TokenizerBuilder::new();
        builder.def_atoms(self.atoms.iter().map(String::as_str))?;
        builder.def_blanks(self.blanks.iter().map(String::as_str))?;
        for prefix in &self.single_line_comments {
            builder.def_sl_comment(prefix)?;
        }
        for (begin, end) in &self.multi_line_comments {
            builder.def_ml_comment(begin, end)?;
        }
        for eol in &self.eol {
            builder.def_eol(*eol)?;
        }
        for string in &self.strings {
            let converter = string.escape.map(|prefix| {
                Arc::new(StdEscapeConverter::new(prefix)) as Arc<dyn EscapeConverter>
            });
            builder.def_string(string.quote, converter)?;
        }
        Ok(builder)
    }
}
