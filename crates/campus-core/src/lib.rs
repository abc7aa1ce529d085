//! Cross-cutting HTTP concerns shared by Campus services.
//!
//! Error taxonomy with the JSON error envelope, the success envelope,
//! health handlers, request-id and error-path middleware, tracing init,
//! and serde helpers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod response;
pub mod serde;
pub mod tracing;
