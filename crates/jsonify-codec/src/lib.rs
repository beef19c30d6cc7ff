//! jsonify-codec - discriminator-tagged polymorphic JSON codec.
//!
//! [`PolymorphicCodec`] encodes a closed sum type as JSON objects whose
//! discriminator field names the variant, and decodes such objects back
//! without external type hints. The [`Operation`] family (`"op"`: `add`,
//! `sub`, `inc`, `dec`) is the built-in instance; [`MediumPayload`] and
//! [`ShortPayload`] are plain records decoded through [`record`].

pub mod constants;
mod error;
mod operation;
mod payload;
pub mod record;
mod registry;

pub use constants::DISCRIMINATOR;
pub use error::{ConfigError, DecodeError, EncodeError};
pub use operation::{
    operation_codec, Add, Decrement, Increment, Operation, OperationKind, Substract,
};
pub use payload::{MediumPayload, ShortPayload};
pub use record::Record;
pub use registry::{
    CodecBuilder, DecodeFn, EncodeFn, PolymorphicCodec, Tagged, Variant, VariantKind,
};

#[doc(hidden)]
pub mod __private {
    pub trait Sealed {}
}

/// The [`PolymorphicCodec`] for [`Operation`].
pub type OperationCodec = PolymorphicCodec<Operation>;
