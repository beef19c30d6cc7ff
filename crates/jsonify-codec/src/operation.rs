//! The `Operation` family: four arithmetic variants tagged by `"op"`.

use std::fmt;

use jsonify_value::JsonObject;

use crate::constants::{ADD_TAG, DECREMENT_TAG, DISCRIMINATOR, INCREMENT_TAG, SUBSTRACT_TAG};
use crate::error::{ConfigError, DecodeError};
use crate::record::{read_i64, Record};
use crate::registry::{CodecBuilder, PolymorphicCodec, Tagged, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Add {
    pub left: i64,
    pub right: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substract {
    pub left: i64,
    pub right: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Increment {
    pub operand: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decrement {
    pub operand: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add(Add),
    Substract(Substract),
    Increment(Increment),
    Decrement(Decrement),
}

crate::variant_kinds! {
    pub enum OperationKind {
        Add,
        Substract,
        Increment,
        Decrement,
    }
}

impl Tagged for Operation {
    type Kind = OperationKind;

    fn kind(&self) -> OperationKind {
        match self {
            Operation::Add(_) => OperationKind::Add,
            Operation::Substract(_) => OperationKind::Substract,
            Operation::Increment(_) => OperationKind::Increment,
            Operation::Decrement(_) => OperationKind::Decrement,
        }
    }
}

/// Builds the `"op"` codec for [`Operation`].
///
/// ```
/// use jsonify_codec::{operation_codec, Add, Increment, Operation};
///
/// let codec = operation_codec().unwrap();
/// let op = codec.decode(r#"{"op":"add","left":1,"right":2}"#).unwrap();
/// assert_eq!(op, Operation::Add(Add { left: 1, right: 2 }));
/// assert_eq!(
///     codec.encode(&Operation::Increment(Increment { operand: 3 })).unwrap(),
///     r#"{"op":"inc","operand":3}"#
/// );
/// ```
pub fn operation_codec() -> Result<PolymorphicCodec<Operation>, ConfigError> {
    CodecBuilder::new(DISCRIMINATOR)
        .variant::<Add>(ADD_TAG)
        .variant::<Substract>(SUBSTRACT_TAG)
        .variant::<Increment>(INCREMENT_TAG)
        .variant::<Decrement>(DECREMENT_TAG)
        .build()
}

macro_rules! binary_variant {
    ($name:ident) => {
        impl Record for $name {
            const FIELDS: &'static [&'static str] = &["left", "right"];

            fn read_fields(object: &JsonObject) -> Result<Self, DecodeError> {
                Ok(Self {
                    left: read_i64(object, "left")?,
                    right: read_i64(object, "right")?,
                })
            }

            fn write_fields(&self, out: &mut JsonObject) {
                out.insert("left".into(), self.left.into());
                out.insert("right".into(), self.right.into());
            }
        }

        impl Variant<Operation> for $name {
            const KIND: OperationKind = OperationKind::$name;

            fn into_tagged(self) -> Operation {
                Operation::$name(self)
            }

            fn from_tagged(value: &Operation) -> Option<&Self> {
                match value {
                    Operation::$name(body) => Some(body),
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(left={}, right={})", stringify!($name), self.left, self.right)
            }
        }
    };
}

macro_rules! unary_variant {
    ($name:ident) => {
        impl Record for $name {
            const FIELDS: &'static [&'static str] = &["operand"];

            fn read_fields(object: &JsonObject) -> Result<Self, DecodeError> {
                Ok(Self {
                    operand: read_i64(object, "operand")?,
                })
            }

            fn write_fields(&self, out: &mut JsonObject) {
                out.insert("operand".into(), self.operand.into());
            }
        }

        impl Variant<Operation> for $name {
            const KIND: OperationKind = OperationKind::$name;

            fn into_tagged(self) -> Operation {
                Operation::$name(self)
            }

            fn from_tagged(value: &Operation) -> Option<&Self> {
                match value {
                    Operation::$name(body) => Some(body),
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(operand={})", stringify!($name), self.operand)
            }
        }
    };
}

binary_variant!(Add);
binary_variant!(Substract);
unary_variant!(Increment);
unary_variant!(Decrement);

impl From<Add> for Operation {
    fn from(body: Add) -> Self {
        Operation::Add(body)
    }
}

impl From<Substract> for Operation {
    fn from(body: Substract) -> Self {
        Operation::Substract(body)
    }
}

impl From<Increment> for Operation {
    fn from(body: Increment) -> Self {
        Operation::Increment(body)
    }
}

impl From<Decrement> for Operation {
    fn from(body: Decrement) -> Self {
        Operation::Decrement(body)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add(body) => fmt::Display::fmt(body, f),
            Operation::Substract(body) => fmt::Display::fmt(body, f),
            Operation::Increment(body) => fmt::Display::fmt(body, f),
            Operation::Decrement(body) => fmt::Display::fmt(body, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{operation_codec, Add, Decrement, Increment, Operation, OperationKind, Substract};
    use crate::registry::{Tagged, VariantKind};

    #[test]
    fn tags_follow_the_wire_table() {
        let codec = operation_codec().unwrap();
        assert_eq!(codec.discriminator(), "op");
        assert_eq!(codec.tags().collect::<Vec<_>>(), ["add", "sub", "inc", "dec"]);
        let cases = [
            (Operation::from(Add { left: 1, right: 2 }), "add"),
            (Operation::from(Substract { left: 1, right: 2 }), "sub"),
            (Operation::from(Increment { operand: 1 }), "inc"),
            (Operation::from(Decrement { operand: 1 }), "dec"),
        ];
        for (op, tag) in cases {
            assert_eq!(codec.tag_of(&op), Some(tag));
            assert_eq!(codec.kind_of_tag(tag), Some(op.kind()));
        }
        assert_eq!(OperationKind::ALL.len(), 4);
        assert_eq!(codec.kind_of_tag("mul"), None::<OperationKind>);
    }

    #[test]
    fn display_reads_like_a_data_class() {
        assert_eq!(Operation::from(Add { left: 1, right: 2 }).to_string(), "Add(left=1, right=2)");
        assert_eq!(
            Operation::from(Substract { left: -1, right: 2 }).to_string(),
            "Substract(left=-1, right=2)"
        );
        assert_eq!(Operation::from(Increment { operand: 3 }).to_string(), "Increment(operand=3)");
        assert_eq!(Operation::from(Decrement { operand: 0 }).to_string(), "Decrement(operand=0)");
    }
}
