//! Application state shared by every request handler.
//!
//! [`AppState`] owns the registry for the lifetime of the server. It is built
//! once by the composition root and cloned into handlers by axum; clones share
//! the same store through an `Arc`.

use std::sync::Arc;

use registro_storage::{InMemoryStore, StudentStore};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The student registry. `StudentStore` methods take `&self`, so no outer
    /// lock is needed.
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    /// Creates a new `AppState` over an empty in-memory registry.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// Creates a new `AppState` over the given store.
    pub fn with_store(store: Arc<dyn StudentStore>) -> Self {
        AppState { store }
    }
}
