//! Wire constants for the operation family.

/// Name of the field that selects the [`crate::Operation`] variant.
pub const DISCRIMINATOR: &str = "op";

pub const ADD_TAG: &str = "add";
pub const SUBSTRACT_TAG: &str = "sub";
pub const INCREMENT_TAG: &str = "inc";
pub const DECREMENT_TAG: &str = "dec";
