//! Plain, untagged payload records.
//!
//! These have no discriminator; they decode field by field through
//! [`crate::record`] and share its shape and type errors.

use std::fmt;

use jsonify_value::JsonObject;

use crate::error::DecodeError;
use crate::record::{read_bool, read_i64, read_string, Record};

/// A person-like record with eight scalar fields.
///
/// JSON field names are camelCase: `firstName`, `lastName`, `birthPlace`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediumPayload {
    pub number: i64,
    pub agent: bool,
    pub first_name: String,
    pub last_name: String,
    pub birth_place: String,
    pub age: i64,
    pub origin: String,
    pub passport: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortPayload {
    pub number: i64,
    pub name: String,
}

impl Record for MediumPayload {
    const FIELDS: &'static [&'static str] = &[
        "number",
        "agent",
        "firstName",
        "lastName",
        "birthPlace",
        "age",
        "origin",
        "passport",
    ];

    fn read_fields(object: &JsonObject) -> Result<Self, DecodeError> {
        Ok(Self {
            number: read_i64(object, "number")?,
            agent: read_bool(object, "agent")?,
            first_name: read_string(object, "firstName")?,
            last_name: read_string(object, "lastName")?,
            birth_place: read_string(object, "birthPlace")?,
            age: read_i64(object, "age")?,
            origin: read_string(object, "origin")?,
            passport: read_string(object, "passport")?,
        })
    }

    fn write_fields(&self, out: &mut JsonObject) {
        out.insert("number".into(), self.number.into());
        out.insert("agent".into(), self.agent.into());
        out.insert("firstName".into(), self.first_name.as_str().into());
        out.insert("lastName".into(), self.last_name.as_str().into());
        out.insert("birthPlace".into(), self.birth_place.as_str().into());
        out.insert("age".into(), self.age.into());
        out.insert("origin".into(), self.origin.as_str().into());
        out.insert("passport".into(), self.passport.as_str().into());
    }
}

impl Record for ShortPayload {
    const FIELDS: &'static [&'static str] = &["number", "name"];

    fn read_fields(object: &JsonObject) -> Result<Self, DecodeError> {
        Ok(Self {
            number: read_i64(object, "number")?,
            name: read_string(object, "name")?,
        })
    }

    fn write_fields(&self, out: &mut JsonObject) {
        out.insert("number".into(), self.number.into());
        out.insert("name".into(), self.name.as_str().into());
    }
}

impl fmt::Display for MediumPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MediumPayload(number={}, agent={}, firstName={}, lastName={}, birthPlace={}, age={}, origin={}, passport={})",
            self.number,
            self.agent,
            self.first_name,
            self.last_name,
            self.birth_place,
            self.age,
            self.origin,
            self.passport
        )
    }
}

impl fmt::Display for ShortPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortPayload(number={}, name={})", self.number, self.name)
    }
}
