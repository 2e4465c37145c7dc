//! The [`StudentStore`] trait defining the storage contract for students.
//!
//! Methods take `&self`: implementations are shared across request tasks
//! and must provide their own interior synchronization.

use registro_core::Student;

use crate::error::StorageError;

/// The storage contract for the student registry.
pub trait StudentStore: Send + Sync {
    /// Stores a student if its id is not taken yet.
    ///
    /// The uniqueness check and the insert are one atomic step: of several
    /// concurrent saves sharing an id, exactly one succeeds. On
    /// [`StorageError::DuplicateId`] the existing entry is left untouched.
    fn save(&self, student: Student) -> Result<Student, StorageError>;

    /// Returns an owned snapshot of every stored student, in no particular order.
    fn list_all(&self) -> Result<Vec<Student>, StorageError>;

    /// Looks a student up by id. The id is not validated.
    fn get_by_id(&self, id: &str) -> Option<Student>;

    /// Returns `true` if a student with this id is stored.
    fn exists_by_id(&self, id: &str) -> bool;

    /// Removes every stored student.
    fn clear(&self);

    /// Number of stored students.
    fn count(&self) -> usize;
}
