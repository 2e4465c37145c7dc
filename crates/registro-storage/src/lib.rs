//! Storage abstraction for the student registry.
//!
//! Provides the [`StudentStore`] trait defining the storage contract, plus
//! [`InMemoryStore`], the concurrent map the server is built on.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: StudentStore trait definition
//! - [`memory`]: InMemoryStore implementation

pub mod error;
pub mod memory;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use traits::StudentStore;
