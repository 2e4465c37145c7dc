//! HTTP/JSON API server for the student registry.
//!
//! Provides `POST /estudiantes` and `GET /estudiantes` over an in-memory
//! registry. This crate contains the router, handlers, API schema types,
//! the error translation layer, and server configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
