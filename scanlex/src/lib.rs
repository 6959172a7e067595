// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod escape;
pub mod lexical;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use escape::{EscapeConverter, EscapeError, EscapeSequence, StdEscapeConverter};
pub use lexical::{
    DefinitionError, Eol, LineSource, TokenDefinitions, Tokenizer, TokenizerBuilder,
    TokenizerError,
};
pub use tokens::{Token, TokenClass, TokenList, TokenListBuilder};
pub use utils::Position;
