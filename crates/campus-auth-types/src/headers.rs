//! Client credential headers used by protected routes.

use http::HeaderMap;
use http::header::AUTHORIZATION;
use uuid::Uuid;

/// Header carrying the caller's user id, used to look up the stored key record.
pub const X_CLIENT_ID: &str = "x-client-id";

/// Read and parse the `x-client-id` header. `None` if absent or not a UUID.
pub fn client_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(X_CLIENT_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok())
}

/// Read the bearer token from the `Authorization` header.
///
/// A `Bearer ` prefix is stripped when present; a bare token is accepted
/// as-is. `None` if the header is absent or empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);
    if token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}
