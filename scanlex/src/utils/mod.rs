//! Shared primitive types used by the scanner and its consumers.

pub mod position;

pub use position::Position;
