//! Error type for scoring, similarity lookups and evaluation.

use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecError>;

#[derive(Debug, Error, PartialEq)]
pub enum RecError {
    /// An identifier is not present in the index it was looked up in.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A caller-supplied parameter is outside its allowed range.
    #[error("invalid parameter: {name} = {value}, expected {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        constraint: String,
    },

    /// An operation needs non-empty input.
    #[error("empty input: {0}")]
    EmptyInput(String),
}

impl RecError {
    pub fn not_found(kind: &'static str, id: impl Display) -> Self {
        RecError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn invalid(name: &'static str, value: impl Display, constraint: impl Into<String>) -> Self {
        RecError::InvalidParameter {
            name,
            value: value.to_string(),
            constraint: constraint.into(),
        }
    }
}
