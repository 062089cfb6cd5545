//! Numbers the metadata service sends as JSON strings.
//!
//! Popularity scores, catalog identifiers and track numbers all arrive as
//! `"0.53"` or `"42"` rather than JSON numbers. The wrappers here keep the
//! parsed value and write it back out as a string, so a decoded response can
//! be serialized in the same shape the service produced.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Numeric flavour a string-encoded field is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralKind {
    /// 64-bit float, used for popularity.
    Float,
    /// Signed 64-bit integer, used for identifiers and track numbers.
    Int,
}

impl fmt::Display for NumeralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumeralKind::Float => f.write_str("float"),
            NumeralKind::Int => f.write_str("integer"),
        }
    }
}

/// A string that is not a valid numeral of the requested kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value:?} is not a valid {kind} numeral")]
pub struct NumeralError {
    /// The offending string, verbatim.
    pub value: String,
    /// What it was supposed to be.
    pub kind: NumeralKind,
}

impl NumeralError {
    fn new(value: &str, kind: NumeralKind) -> Self {
        NumeralError {
            value: value.to_string(),
            kind,
        }
    }
}

/// Parse a float numeral. Non-finite results (`NaN`, `inf`, overflow) are rejected.
pub fn parse_float(s: &str) -> Result<f64, NumeralError> {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(NumeralError::new(s, NumeralKind::Float)),
    }
}

/// Parse a signed integer numeral.
pub fn parse_int(s: &str) -> Result<i64, NumeralError> {
    s.parse::<i64>().map_err(|_| NumeralError::new(s, NumeralKind::Int))
}

/// Float transmitted as a JSON string, e.g. `"popularity": "0.53"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatString(pub f64);

impl FloatString {
    /// The parsed value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for FloatString {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_float(s).map(FloatString)
    }
}

impl fmt::Display for FloatString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Display` for f64 is the shortest string that parses back to the same value
        write!(f, "{}", self.0)
    }
}

impl From<FloatString> for f64 {
    fn from(f: FloatString) -> f64 {
        f.0
    }
}

impl Serialize for FloatString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Integer transmitted as a JSON string, e.g. `"track-number": "7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntString(pub i64);

impl IntString {
    /// The parsed value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl FromStr for IntString {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_int(s).map(IntString)
    }
}

impl fmt::Display for IntString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<IntString> for i64 {
    fn from(i: IntString) -> i64 {
        i.0
    }
}

impl Serialize for IntString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
