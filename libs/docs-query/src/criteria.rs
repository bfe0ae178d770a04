//! Criteria columns and value validation.
//!
//! Criteria objects themselves are plain data with optional fields. Each family
//! describes them to the composer as a list of [`CriteriaField`]s; whether a field
//! contributes a predicate is decided by the composer, never by the criteria object.

use crate::{Error, Result};

/// Accepted shape of a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Record identifier: lowercase alphanumerics and `-`, at most 36 characters.
    Identifier,
    /// Free text bounded by the column width.
    Text { max_len: usize },
}

const IDENTIFIER_MAX_LEN: usize = 36;

impl ValueKind {
    pub fn validate(&self, field: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::invalid_criteria(format!(
                "{field} must not be empty"
            )));
        }

        match self {
            ValueKind::Identifier => {
                if value.chars().count() > IDENTIFIER_MAX_LEN {
                    return Err(Error::invalid_criteria(format!(
                        "{field} exceeds {IDENTIFIER_MAX_LEN} characters"
                    )));
                }
                if !value
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                {
                    return Err(Error::invalid_criteria(format!(
                        "{field} is not a valid identifier: {value:?}"
                    )));
                }
            }
            ValueKind::Text { max_len } => {
                if value.chars().count() > *max_len {
                    return Err(Error::invalid_criteria(format!(
                        "{field} exceeds {max_len} characters"
                    )));
                }
                if value.chars().any(char::is_control) {
                    return Err(Error::invalid_criteria(format!(
                        "{field} contains control characters"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// One filterable column of a family, with the caller's value if present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaField<'a> {
    /// Caller-facing field name, used in validation messages.
    pub name: &'static str,
    /// Whitelisted column expression compared for equality.
    pub column: &'static str,
    pub kind: ValueKind,
    pub value: Option<&'a str>,
}

impl<'a> CriteriaField<'a> {
    pub fn new(
        name: &'static str,
        column: &'static str,
        kind: ValueKind,
        value: Option<&'a str>,
    ) -> Self {
        Self {
            name,
            column,
            kind,
            value,
        }
    }
}
