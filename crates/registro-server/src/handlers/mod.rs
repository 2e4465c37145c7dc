//! HTTP handler modules for the registry API.
//!
//! Handlers parse requests, delegate to the [`StudentStore`] held in
//! [`AppState`], and return JSON responses. No business logic lives in
//! handlers; failures are returned as [`ApiError`] and rendered there.
//!
//! [`StudentStore`]: registro_storage::StudentStore
//! [`AppState`]: crate::state::AppState
//! [`ApiError`]: crate::error::ApiError

pub mod students;
