//! Storage error types for registro-storage.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A student with the given id is already stored.
    ///
    /// This is an invalid-argument condition: the request itself is at fault.
    #[error("Ya existe un estudiante con el ID: {id}")]
    DuplicateId { id: String },

    /// The backing store failed for a reason unrelated to the request.
    #[error("storage backend error: {reason}")]
    Backend { reason: String },
}
