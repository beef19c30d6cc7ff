//! Discriminator-tagged polymorphic codec.
//!
//! A [`PolymorphicCodec`] maps a closed sum type to JSON objects that carry a
//! tag in a discriminator field (`{"op":"add","left":1,"right":2}`) and back.
//! The tag table is the single source of truth for both directions: it is
//! assembled with a [`CodecBuilder`] and checked once in
//! [`CodecBuilder::build`], so a codec that exists is complete and
//! unambiguous.
//!
//! Decoding is lenient about fields: anything a variant does not declare,
//! including the discriminator itself, is ignored. Unknown tags are errors.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use jsonify_value::{parse, stringify, stringify_with, JsonObject, JsonValue, StringifyOptions};

use crate::__private;
use crate::error::{ConfigError, DecodeError, EncodeError};
use crate::record::{expect_array, expect_object, Record};

/// Field-less identity of each variant of a [`Tagged`] type.
///
/// Implemented only through [`variant_kinds!`](crate::variant_kinds), so
/// [`VariantKind::ALL`] always lists every enum variant.
pub trait VariantKind:
    __private::Sealed + Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static
{
    /// Every kind, in declaration order.
    const ALL: &'static [Self];
}

/// Declares a variant-kind enum together with its [`VariantKind`] impl.
///
/// ```
/// use jsonify_codec::VariantKind;
///
/// jsonify_codec::variant_kinds! {
///     pub enum ShapeKind { Dot, Line }
/// }
///
/// assert_eq!(ShapeKind::ALL, &[ShapeKind::Dot, ShapeKind::Line]);
/// ```
#[macro_export]
macro_rules! variant_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::__private::Sealed for $name {}

        impl $crate::VariantKind for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
        }
    };
}

/// A closed sum type whose values can be told apart by a variant kind.
pub trait Tagged: Sized + 'static {
    type Kind: VariantKind;

    fn kind(&self) -> Self::Kind;
}

/// One variant body of a [`Tagged`] type.
pub trait Variant<T: Tagged>: Record {
    const KIND: T::Kind;

    fn into_tagged(self) -> T;

    /// Borrows the body back out of the sum type, if `value` is this variant.
    fn from_tagged(value: &T) -> Option<&Self>;
}

/// Builds a variant from a tagged object.
pub type DecodeFn<T> = fn(&JsonObject) -> Result<T, DecodeError>;

/// Appends a variant's fields to an object that already holds the tag.
pub type EncodeFn<T> = fn(&T, &mut JsonObject) -> Result<(), EncodeError>;

struct Entry<T: Tagged> {
    kind: T::Kind,
    tag: String,
    fields: &'static [&'static str],
    decode: DecodeFn<T>,
    encode: EncodeFn<T>,
}

fn decode_variant<T: Tagged, V: Variant<T>>(object: &JsonObject) -> Result<T, DecodeError> {
    V::read_fields(object).map(V::into_tagged)
}

fn encode_variant<T: Tagged, V: Variant<T>>(
    value: &T,
    out: &mut JsonObject,
) -> Result<(), EncodeError> {
    let body = V::from_tagged(value)
        .ok_or_else(|| EncodeError::VariantMismatch(format!("{:?}", V::KIND)))?;
    body.write_fields(out);
    Ok(())
}

/// Collects the tag table for a [`PolymorphicCodec`].
pub struct CodecBuilder<T: Tagged> {
    discriminator: String,
    entries: Vec<Entry<T>>,
}

impl<T: Tagged> CodecBuilder<T> {
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            entries: Vec::new(),
        }
    }

    /// Registers variant `V` under `tag`, using its [`Record`] impl for the body.
    pub fn variant<V: Variant<T>>(mut self, tag: impl Into<String>) -> Self {
        self.entries.push(Entry {
            kind: V::KIND,
            tag: tag.into(),
            fields: V::FIELDS,
            decode: decode_variant::<T, V>,
            encode: encode_variant::<T, V>,
        });
        self
    }

    /// Registers a variant with explicit codec functions.
    ///
    /// The written fields are unknown until encode time, so a collision with
    /// the discriminator surfaces as [`EncodeError::DiscriminatorOverwritten`].
    pub fn variant_with(
        mut self,
        kind: T::Kind,
        tag: impl Into<String>,
        decode: DecodeFn<T>,
        encode: EncodeFn<T>,
    ) -> Self {
        self.entries.push(Entry {
            kind,
            tag: tag.into(),
            fields: &[],
            decode,
            encode,
        });
        self
    }

    /// Validates the table and freezes it into a codec.
    ///
    /// Fails when the discriminator or a tag is empty, when two variants
    /// share a tag, when a variant is registered twice, when a variant
    /// declares a field named like the discriminator, or when a kind in
    /// [`VariantKind::ALL`] has no entry.
    pub fn build(self) -> Result<PolymorphicCodec<T>, ConfigError> {
        let discriminator = self.discriminator.clone();
        let result = self.validate();
        match &result {
            Ok(codec) => tracing::debug!(
                discriminator = %codec.discriminator,
                variants = codec.entries.len(),
                "built polymorphic codec"
            ),
            Err(err) => tracing::warn!(
                discriminator = %discriminator,
                error = %err,
                "rejected polymorphic codec configuration"
            ),
        }
        result
    }

    fn validate(self) -> Result<PolymorphicCodec<T>, ConfigError> {
        if self.discriminator.is_empty() {
            return Err(ConfigError::EmptyDiscriminator);
        }

        let mut by_tag: HashMap<String, usize> = HashMap::with_capacity(self.entries.len());
        let mut by_kind: HashMap<T::Kind, usize> = HashMap::with_capacity(self.entries.len());
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.tag.is_empty() {
                return Err(ConfigError::EmptyTag(format!("{:?}", entry.kind)));
            }
            if entry.fields.iter().any(|field| *field == self.discriminator) {
                return Err(ConfigError::DiscriminatorCollision {
                    tag: entry.tag.clone(),
                    field: self.discriminator.clone(),
                });
            }
            if let Some(&prev) = by_kind.get(&entry.kind) {
                return Err(ConfigError::DuplicateVariant {
                    variant: format!("{:?}", entry.kind),
                    first: self.entries[prev].tag.clone(),
                    second: entry.tag.clone(),
                });
            }
            if let Some(&prev) = by_tag.get(&entry.tag) {
                return Err(ConfigError::DuplicateTag {
                    tag: entry.tag.clone(),
                    first: format!("{:?}", self.entries[prev].kind),
                    second: format!("{:?}", entry.kind),
                });
            }
            by_tag.insert(entry.tag.clone(), i);
            by_kind.insert(entry.kind, i);
        }

        let all = <T::Kind as VariantKind>::ALL;
        if let Some(missing) = all.iter().find(|kind| !by_kind.contains_key(*kind)) {
            return Err(ConfigError::MissingVariant(format!("{missing:?}")));
        }

        Ok(PolymorphicCodec {
            discriminator: self.discriminator,
            entries: self.entries,
            by_tag,
            by_kind,
        })
    }
}

/// Encoder/decoder for a [`Tagged`] type over a fixed tag table.
///
/// Immutable after construction; share it by reference across threads.
pub struct PolymorphicCodec<T: Tagged> {
    discriminator: String,
    entries: Vec<Entry<T>>,
    by_tag: HashMap<String, usize>,
    by_kind: HashMap<T::Kind, usize>,
}

impl<T: Tagged> PolymorphicCodec<T> {
    pub fn builder(discriminator: impl Into<String>) -> CodecBuilder<T> {
        CodecBuilder::new(discriminator)
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Registered tags, in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.tag.as_str())
    }

    pub fn tag_of(&self, value: &T) -> Option<&str> {
        self.entry(value).ok().map(|entry| entry.tag.as_str())
    }

    pub fn kind_of_tag(&self, tag: &str) -> Option<T::Kind> {
        self.by_tag.get(tag).map(|&i| self.entries[i].kind)
    }

    fn entry(&self, value: &T) -> Result<&Entry<T>, EncodeError> {
        let kind = value.kind();
        self.by_kind
            .get(&kind)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| EncodeError::UnregisteredVariant(format!("{kind:?}")))
    }

    /// Parses `text` and decodes one tagged object.
    pub fn decode(&self, text: &str) -> Result<T, DecodeError> {
        let value = parse(text)?;
        self.decode_value(&value)
    }

    pub fn decode_value(&self, value: &JsonValue) -> Result<T, DecodeError> {
        self.decode_object(expect_object(value)?)
    }

    /// Dispatches on the discriminator and runs the matching variant decoder.
    pub fn decode_object(&self, object: &JsonObject) -> Result<T, DecodeError> {
        let result = self.dispatch(object);
        if let Err(err) = &result {
            tracing::trace!(error = %err, "decode failed");
        }
        result
    }

    fn dispatch(&self, object: &JsonObject) -> Result<T, DecodeError> {
        let tag = match object.get(&self.discriminator) {
            None => return Err(DecodeError::MissingDiscriminator),
            Some(JsonValue::String(tag)) => tag,
            Some(other) => return Err(DecodeError::InvalidDiscriminator(other.kind())),
        };
        let Some(&index) = self.by_tag.get(tag.as_str()) else {
            return Err(DecodeError::UnknownVariant(tag.clone()));
        };
        (self.entries[index].decode)(object)
    }

    /// Parses `text` and decodes every element of the root array.
    ///
    /// All or nothing: the first element that fails aborts the batch and its
    /// error is returned unchanged.
    pub fn decode_all(&self, text: &str) -> Result<Vec<T>, DecodeError> {
        let value = parse(text)?;
        self.decode_all_value(&value)
    }

    pub fn decode_all_value(&self, value: &JsonValue) -> Result<Vec<T>, DecodeError> {
        let items = expect_array(value)?;
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.decode_value(item) {
                Ok(decoded) => out.push(decoded),
                Err(err) => {
                    tracing::trace!(index, error = %err, "batch decode aborted");
                    return Err(err);
                }
            }
        }
        Ok(out)
    }

    /// Builds the tagged object: discriminator first, then the variant fields
    /// in declaration order.
    ///
    /// Never fails for variants registered through [`CodecBuilder::variant`]
    /// whose [`Variant`] impl agrees with [`Tagged::kind`].
    pub fn encode_value(&self, value: &T) -> Result<JsonValue, EncodeError> {
        let entry = self.entry(value)?;
        let mut out = JsonObject::new();
        out.insert(
            self.discriminator.clone(),
            JsonValue::String(entry.tag.clone()),
        );
        (entry.encode)(value, &mut out)?;
        match out.get(&self.discriminator) {
            Some(JsonValue::String(tag)) if *tag == entry.tag => Ok(JsonValue::Object(out)),
            _ => Err(EncodeError::DiscriminatorOverwritten {
                tag: entry.tag.clone(),
                field: self.discriminator.clone(),
            }),
        }
    }

    pub fn encode(&self, value: &T) -> Result<String, EncodeError> {
        Ok(stringify(&self.encode_value(value)?))
    }

    pub fn encode_with(
        &self,
        value: &T,
        options: &StringifyOptions,
    ) -> Result<String, EncodeError> {
        Ok(stringify_with(&self.encode_value(value)?, options))
    }

    pub fn encode_all_value(&self, values: &[T]) -> Result<JsonValue, EncodeError> {
        values
            .iter()
            .map(|v| self.encode_value(v))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array)
    }

    pub fn encode_all(&self, values: &[T]) -> Result<String, EncodeError> {
        Ok(stringify(&self.encode_all_value(values)?))
    }
}

impl<T: Tagged> fmt::Debug for PolymorphicCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolymorphicCodec")
            .field("discriminator", &self.discriminator)
            .field("tags", &self.tags().collect::<Vec<_>>())
            .finish()
    }
}
