//! jsonify-value - a small, ordered JSON value model.
//!
//! Provides [`JsonValue`] (an insertion-ordered tree of JSON nodes), a strict
//! text parser ([`parse`]) that reports failures with a byte offset, and a
//! total serializer ([`stringify`] / [`stringify_with`]).
//!
//! Integers are kept exactly as [`Number::Integer`]; everything else numeric
//! is a [`Number::Float`].

mod convert;
mod error;
mod number;
mod parse;
mod stringify;
mod value;

pub use error::{ParseError, ParseErrorKind};
pub use number::Number;
pub use parse::{parse, MAX_DEPTH};
pub use stringify::{stringify, stringify_with, StringifyOptions};
pub use value::{JsonKind, JsonObject, JsonValue};
