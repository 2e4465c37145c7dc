//! Domain model for the student registry.
//!
//! - [`student`]: the validated [`Student`] entity and its field checks
//! - [`error`]: [`CoreError`] and the multi-field [`ValidationErrors`]

pub mod error;
pub mod student;

// Re-export commonly used types
pub use error::{CoreError, FieldViolation, ValidationErrors};
pub use student::{Student, ID_PATTERN};
