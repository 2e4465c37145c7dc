//! In-memory implementation of [`StudentStore`].
//!
//! [`InMemoryStore`] is the registry the server runs on. Nothing is persisted;
//! the map lives exactly as long as the value that owns it.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use registro_core::Student;

use crate::error::StorageError;
use crate::traits::StudentStore;

/// In-memory implementation of [`StudentStore`].
///
/// Backed by `DashMap` for concurrent access from multiple async handler
/// tasks. Inserts go through the entry API, which holds the shard lock for
/// the id across the existence check and the write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    students: DashMap<String, Student>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        InMemoryStore {
            students: DashMap::new(),
        }
    }
}

impl StudentStore for InMemoryStore {
    fn save(&self, student: Student) -> Result<Student, StorageError> {
        match self.students.entry(student.id().to_string()) {
            Entry::Occupied(entry) => Err(StorageError::DuplicateId {
                id: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(student.clone());
                Ok(student)
            }
        }
    }

    fn list_all(&self) -> Result<Vec<Student>, StorageError> {
        Ok(self
            .students
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn get_by_id(&self, id: &str) -> Option<Student> {
        self.students.get(id).map(|entry| entry.value().clone())
    }

    fn exists_by_id(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    fn clear(&self) {
        self.students.clear();
    }

    fn count(&self) -> usize {
        self.students.len()
    }
}
