//! Core error types for registro-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering every
//! way a student field can be rejected. Each variant is an invalid-argument
//! condition: the caller supplied a value the entity refuses to hold.

use std::fmt;

use thiserror::Error;

/// Core errors produced by the registro-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The id was missing or contained only whitespace.
    #[error("El ID no puede estar vacio")]
    BlankId,

    /// The id did not match the nine-digit pattern.
    #[error("El ID debe tener exactamente 9 digitos")]
    MalformedId { value: String },

    /// The name was missing or contained only whitespace.
    #[error("El nombre no puede estar vacio")]
    BlankName,

    /// The program was missing or contained only whitespace.
    #[error("La carrera no puede estar vacia")]
    BlankProgram,
}

impl CoreError {
    /// Wire name of the field this error belongs to.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CoreError::BlankId | CoreError::MalformedId { .. } => Some("id"),
            CoreError::BlankName => Some("nombre"),
            CoreError::BlankProgram => Some("carrera"),
        }
    }
}

/// A single rejected field collected while binding a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire field name, when the violation can be attributed to one.
    pub field: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl From<CoreError> for FieldViolation {
    fn from(err: CoreError) -> Self {
        FieldViolation {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

/// Every field violation found while validating a payload.
///
/// Unlike [`CoreError`], which stops at the first bad field, this carries one
/// entry per failing field so a client can fix them all in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, violation: impl Into<FieldViolation>) {
        self.violations.push(violation.into());
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Recorded violations in the order they were found.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.violations.len())
    }
}

impl std::error::Error for ValidationErrors {}
