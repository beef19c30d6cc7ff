//! Codec error types.

use jsonify_value::{JsonKind, ParseError};
use thiserror::Error;

/// Rejected codec configuration, reported by [`crate::CodecBuilder::build`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("discriminator field name is empty")]
    EmptyDiscriminator,
    #[error("variant {0} has an empty tag")]
    EmptyTag(String),
    #[error("tag `{tag}` is registered for both {first} and {second}")]
    DuplicateTag {
        tag: String,
        first: String,
        second: String,
    },
    #[error("variant {variant} is registered twice (tags `{first}` and `{second}`)")]
    DuplicateVariant {
        variant: String,
        first: String,
        second: String,
    },
    #[error("variant {0} has no registered tag")]
    MissingVariant(String),
    #[error("variant tagged `{tag}` declares field `{field}`, which is the discriminator")]
    DiscriminatorCollision { tag: String, field: String },
}

/// A value the codec could not turn into a tagged object.
///
/// Only reachable through hand-written [`crate::Variant`] or raw codec
/// functions that disagree with the tag table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("variant {0} has no registered tag")]
    UnregisteredVariant(String),
    #[error("variant {0} does not hold the value being encoded")]
    VariantMismatch(String),
    #[error("variant tagged `{tag}` overwrote the discriminator `{field}`")]
    DiscriminatorOverwritten { tag: String, field: String },
}

/// Why a JSON document could not be turned into a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Malformed(#[from] ParseError),
    #[error("shape mismatch: expected {expected}, found {actual}")]
    ShapeMismatch { expected: JsonKind, actual: JsonKind },
    #[error("missing discriminator field")]
    MissingDiscriminator,
    #[error("discriminator must be a string, found {0}")]
    InvalidDiscriminator(JsonKind),
    #[error("unknown variant tag `{0}`")]
    UnknownVariant(String),
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{field}`: expected {expected}, found {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: JsonKind,
        actual: JsonKind,
    },
    #[error("field `{0}` is not an integer in the i64 range")]
    InvalidInteger(String),
}

impl DecodeError {
    pub(crate) fn field_type(field: &str, expected: JsonKind, actual: JsonKind) -> Self {
        DecodeError::FieldTypeMismatch {
            field: field.to_string(),
            expected,
            actual,
        }
    }
}
