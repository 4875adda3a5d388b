use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::Value;

/// Result type for matcher operations
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can abort a match before a boolean is produced
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The search argument is a match-pattern object
    #[error("Search argument must not be a match pattern")]
    PatternArgument,

    /// A conversion hook raised; carries the raised value unmodified
    #[error("Conversion raised: {0}")]
    Conversion(Thrown),

    /// The receiver has no text representation
    #[error("Receiver is not coercible to text: {0}")]
    InvalidReceiver(&'static str),

    /// Every conversion hook of an object returned a non-primitive
    #[error("Cannot convert object to primitive value")]
    NoPrimitive,
}

impl MatchError {
    /// Wrap a raised value
    pub fn thrown(value: impl Into<Value>) -> Self {
        Self::Conversion(Thrown::new(value))
    }

    #[must_use]
    pub const fn kind(&self) -> MatchErrorKind {
        match self {
            Self::PatternArgument => MatchErrorKind::PatternArgument,
            Self::Conversion(_) => MatchErrorKind::Conversion,
            Self::InvalidReceiver(_) => MatchErrorKind::InvalidReceiver,
            Self::NoPrimitive => MatchErrorKind::NoPrimitive,
        }
    }

    /// The raised value, when this is a conversion failure
    #[must_use]
    pub const fn thrown_value(&self) -> Option<&Value> {
        match self {
            Self::Conversion(thrown) => Some(thrown.value()),
            _ => None,
        }
    }
}

/// Discriminant of [`MatchError`], used where the payload does not matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchErrorKind {
    PatternArgument,
    Conversion,
    InvalidReceiver,
    NoPrimitive,
}

impl MatchErrorKind {
    pub const ALL: [Self; 4] = [
        Self::PatternArgument,
        Self::Conversion,
        Self::InvalidReceiver,
        Self::NoPrimitive,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PatternArgument => "PatternArgument",
            Self::Conversion => "Conversion",
            Self::InvalidReceiver => "InvalidReceiver",
            Self::NoPrimitive => "NoPrimitive",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for MatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value raised by a conversion hook
#[derive(Debug, Clone, PartialEq)]
pub struct Thrown(Value);

impl Thrown {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in MatchErrorKind::ALL {
            assert_eq!(MatchErrorKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MatchErrorKind::parse("Other"), None);
    }

    #[test]
    fn thrown_keeps_original_value() {
        let err = MatchError::thrown("error");
        assert_eq!(err.kind(), MatchErrorKind::Conversion);
        assert_eq!(err.thrown_value(), Some(&Value::from("error")));
        assert_eq!(err.to_string(), "Conversion raised: \"error\"");
    }
}
