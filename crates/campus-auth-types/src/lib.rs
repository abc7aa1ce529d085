//! Auth types shared between token issuance and token validation.
//!
//! Provides the JWT claims payload, RS256 validation against a stored
//! public key, and helpers for reading the client credential headers.

pub mod headers;
pub mod token;
