//! Token records and whole-input collection
//!
//! [`Token`] is what every `next_token` call yields: a class, the literal (or
//! decoded) text and the 0-based position where it starts. String tokens also
//! remember their quote and escape prefix.
//!
//! [`TokenListBuilder`] drains an entire source in one call and separates the
//! tokens a consumer usually cares about from blanks, comments and line ends.

pub mod token;
pub mod token_list;

pub use token::{Token, TokenClass};
pub use token_list::{TokenList, TokenListBuilder};

// Re-export position type from utils
pub use crate::utils::Position;
