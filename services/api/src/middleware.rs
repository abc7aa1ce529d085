//! Protected-route authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use campus_auth_types::headers::{bearer_token, client_id};
use campus_auth_types::token::validate_token;
use campus_core::error::ApiError;

use crate::domain::repository::KeyRepository;
use crate::state::AppState;

/// Caller identity proven by `x-client-id` + a bearer token that verifies
/// against that client's stored public key.
///
/// Add as a handler argument to protect a route. `key_id` identifies the
/// key record the token verified against (logout deletes it).
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    pub user_id: Uuid,
    pub key_id: Uuid,
}

impl FromRequestParts<AppState> for AuthenticatedClient {
    type Rejection = ApiError;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let client_id = client_id(&parts.headers);
        let token = bearer_token(&parts.headers);
        let keys = state.key_repo();

        async move {
            let client_id =
                client_id.ok_or_else(|| ApiError::unauthorized("Client id is missing or invalid"))?;
            let token = token
                .ok_or_else(|| ApiError::unauthorized("Access token is missing or invalid"))?;

            let record = keys
                .find_by_user_id(client_id)
                .await?
                .ok_or_else(|| ApiError::unauthorized("Client is not recognized"))?;

            let info = validate_token(&token, &record.public_key)
                .map_err(|_| ApiError::forbidden("Token is not valid"))?;

            if info.user_id != client_id {
                return Err(ApiError::unauthorized("Token does not match client"));
            }

            Ok(Self {
                user_id: info.user_id,
                key_id: record.id,
            })
        }
    }
}
