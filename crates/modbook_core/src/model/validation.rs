//! Field-level validation errors shared by all entity value types.
//!
//! # Invariants
//! - Every validated value type rejects bad input in its constructor.
//! - Deserialization routes through the same constructors (`serde(try_from)`),
//!   so persisted data cannot bypass these checks. Free-text fields (address,
//!   title) get the same whitespace normalization on load as in the builders.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for one entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    InvalidName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidTag(String),
    InvalidModuleCode(String),
    CreditsOutOfRange { credits: u8, max: u8 },
    InvalidSemester(usize),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`: only letters, digits, spaces and ' - . are allowed"
            ),
            Self::InvalidPhone(value) => {
                write!(f, "invalid phone `{value}`: expected at least 3 digits")
            }
            Self::InvalidEmail(value) => {
                write!(f, "invalid email `{value}`: expected local-part@domain")
            }
            Self::InvalidTag(value) => {
                write!(f, "invalid tag `{value}`: tags must be alphanumeric")
            }
            Self::InvalidModuleCode(value) => write!(
                f,
                "invalid module code `{value}`: expected 2-4 letters, 3-4 digits and an optional 1-2 letter suffix"
            ),
            Self::CreditsOutOfRange { credits, max } => {
                write!(f, "module credits {credits} exceed maximum {max}")
            }
            Self::InvalidSemester(value) => {
                write!(f, "semester index {value} is invalid; expected 0 or 1")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims and collapses inner whitespace runs to a single space.
pub(crate) fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, ValidationError};

    #[test]
    fn collapse_whitespace_trims_and_joins() {
        assert_eq!(collapse_whitespace("  Alex \t  Yeoh \n"), "Alex Yeoh");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = ValidationError::InvalidModuleCode("CS".to_string());
        assert!(err.to_string().contains("`CS`"));
    }
}
