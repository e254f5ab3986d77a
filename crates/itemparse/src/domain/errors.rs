//! Domain-specific errors.

use thiserror::Error;

use crate::domain::model::Role;

/// Failures surfaced by auto-fill. Everything else recovers locally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("auto-fill produced no highlights")]
    DegenerateParse,
    #[error("the examples never show a {from} to {to} transition to wrap around with")]
    WrapDelimiterUnavailable { from: Role, to: Role },
}

/// Error returned when parsing a `LOCATION:LENGTH` span fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpanSpecError {
    #[error("invalid span '{0}', expected LOCATION:LENGTH")]
    Malformed(String),
    #[error("span '{0}' is empty")]
    Empty(String),
}
