use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;

use campus_core::error::ApiError;
use campus_core::response::SuccessResponse;

use crate::domain::types::User;
use crate::middleware::AuthenticatedClient;
use crate::state::AppState;
use crate::usecase::access::{
    AccessOutput, LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, SignUpInput,
    SignUpUseCase,
};

/// Client-facing user summary; never includes the password hash.
#[derive(Serialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

fn access_metadata(out: &AccessOutput) -> serde_json::Value {
    json!({
        "user": UserSummary::from(&out.user),
        "tokens": out.tokens,
    })
}

// ── POST /api/auth/signup ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub name: Option<String>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<SuccessResponse, ApiError> {
    let usecase = SignUpUseCase {
        users: state.user_repo(),
        keys: state.key_repo(),
    };
    let out = usecase
        .execute(SignUpInput {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;
    Ok(SuccessResponse::created(access_metadata(&out)).with_message("User created successfully!"))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<SuccessResponse, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        keys: state.key_repo(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(SuccessResponse::ok(access_metadata(&out)))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(
    client: AuthenticatedClient,
    State(state): State<AppState>,
) -> Result<SuccessResponse, ApiError> {
    let usecase = LogoutUseCase {
        keys: state.key_repo(),
    };
    usecase.execute(client.key_id).await?;
    Ok(SuccessResponse::ok(json!({"success": true})).with_message("Logout successfully!"))
}

// ── POST /api/auth/refresh-token ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<SuccessResponse, ApiError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        keys: state.key_repo(),
    };
    let out = usecase.execute(&body.refresh_token).await?;
    Ok(SuccessResponse::ok(access_metadata(&out)).with_message("Get access token successfully!"))
}
