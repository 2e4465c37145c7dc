//! API schema types for request/response definitions.
//!
//! Types use serde derives for JSON serialization/deserialization. Responses
//! serialize [`registro_core::Student`] directly.

pub mod students;
