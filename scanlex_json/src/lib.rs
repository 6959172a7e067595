//! JSON documents on top of the scanlex tokenizer
//!
//! ```
//! let value = scanlex_json::parse_str(r#"{"a": [1, 2.5, "x"]}"#).unwrap().unwrap();
//! assert_eq!(value.get("a").and_then(|a| a.as_array()).map(|a| a.len()), Some(3));
//! ```

pub mod error;
pub mod parser;
pub mod value;

pub use error::{JsonError, JsonResult};
pub use parser::{json_grammar, parse_str, JsonParser};
pub use value::JsonValue;
