//! [`Number`] - JSON number with an exact integer representation.

use std::fmt;

/// A JSON number.
///
/// Literals without a fraction or exponent that fit in an `i64` are kept as
/// [`Number::Integer`]; every other number is a [`Number::Float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

// 2^63 as f64; the first float past the top of the i64 range.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Number {
    /// Returns the number as an `i64` when it denotes an integer exactly.
    ///
    /// Floats qualify when they are finite, have no fractional part and lie
    /// inside the `i64` range (`3.0` and `1e3` do, `2.5` and `1e19` do not).
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(n) => Some(n),
            Number::Float(f) => {
                if f.is_finite()
                    && f.fract() == 0.0
                    && f >= -I64_UPPER_BOUND
                    && f < I64_UPPER_BOUND
                {
                    Some(f as i64)
                } else {
                    None
                }
            }
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::Integer(n.into())
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl fmt::Display for Number {
    /// Writes the number as JSON text.
    ///
    /// Finite floats always carry a `.` or an exponent so that they parse back
    /// as floats. Non-finite floats have no JSON form and are written as `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Float(x) if !x.is_finite() => f.write_str("null"),
            Number::Float(x) => {
                let abs = x.abs();
                if abs != 0.0 && !(1e-6..1e16).contains(&abs) {
                    write!(f, "{x:e}")
                } else if x.fract() == 0.0 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
        }
    }
}
