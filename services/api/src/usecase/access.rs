//! Signup, login, logout, and refresh-token flows.
//!
//! Every successful signup/login mints a fresh RSA key pair for the
//! session and replaces the user's key record; refresh reuses the stored
//! pair and rotates only the refresh token.

use anyhow::Context as _;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use rsa::RsaPrivateKey;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use campus_auth_types::token::{ACCESS_TOKEN_EXP, JwtClaims, REFRESH_TOKEN_EXP, validate_token};
use campus_core::error::ApiError;

use crate::domain::repository::{KeyRepository, UserRepository};
use crate::domain::types::{KeyRecord, User};

/// RSA modulus size for per-session key pairs.
const RSA_BITS: usize = 2048;

/// Freshly generated RSA key pair, PEM-encoded.
pub struct KeyPairPem {
    /// SPKI PEM.
    pub public_key: String,
    /// PKCS#8 PEM.
    pub private_key: String,
}

pub fn generate_key_pair() -> Result<KeyPairPem, ApiError> {
    let mut rng = rand::thread_rng();
    let private = RsaPrivateKey::new(&mut rng, RSA_BITS).context("generate rsa key pair")?;
    let public_key = private
        .to_public_key()
        .to_public_key_pem(LineEnding::LF)
        .context("encode public key")?;
    let private_key = private
        .to_pkcs8_pem(LineEnding::LF)
        .context("encode private key")?
        .to_string();
    Ok(KeyPairPem {
        public_key,
        private_key,
    })
}

/// Access + refresh token pair returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(user_id: Uuid, email: &str, exp: u64, key: &EncodingKey) -> Result<String, ApiError> {
    let claims = JwtClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        exp,
    };
    let token = encode(&Header::new(jsonwebtoken::Algorithm::RS256), &claims, key)
        .context("sign token")?;
    Ok(token)
}

/// Sign an RS256 access + refresh token pair with the private key PEM.
pub fn issue_token_pair(
    user_id: Uuid,
    email: &str,
    private_key_pem: &str,
) -> Result<TokenPair, ApiError> {
    let key =
        EncodingKey::from_rsa_pem(private_key_pem.as_bytes()).context("load rsa private key")?;
    let now = now_secs();
    Ok(TokenPair {
        access_token: sign(user_id, email, now + ACCESS_TOKEN_EXP, &key)?,
        refresh_token: sign(user_id, email, now + REFRESH_TOKEN_EXP, &key)?,
    })
}

fn new_key_record(user_id: Uuid, pair: KeyPairPem, refresh_token: String) -> KeyRecord {
    let now = Utc::now();
    KeyRecord {
        id: Uuid::now_v7(),
        user_id,
        public_key: pair.public_key,
        private_key: pair.private_key,
        refresh_token,
        refresh_tokens_used: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

// ── SignUp ───────────────────────────────────────────────────────────────────

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct AccessOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignUpUseCase<U: UserRepository, K: KeyRepository> {
    pub users: U,
    pub keys: K,
}

impl<U: UserRepository, K: KeyRepository> SignUpUseCase<U, K> {
    pub async fn execute(&self, input: SignUpInput) -> Result<AccessOutput, ApiError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::bad_request("Email and password are required"));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::conflict("Email already exists"));
        }

        let password = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .context("hash password")?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email: input.email,
            password,
            name: input.name,
            role: "user".to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let pair = generate_key_pair()?;
        let tokens = issue_token_pair(user.id, &user.email, &pair.private_key)?;
        self.keys
            .upsert(&new_key_record(user.id, pair, tokens.refresh_token.clone()))
            .await?;

        Ok(AccessOutput { user, tokens })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository, K: KeyRepository> {
    pub users: U,
    pub keys: K,
}

impl<U: UserRepository, K: KeyRepository> LoginUseCase<U, K> {
    pub async fn execute(&self, input: LoginInput) -> Result<AccessOutput, ApiError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(ApiError::bad_request("Email and password are required"));
        }

        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| ApiError::unauthorized("User not registered"))?;

        let matches = bcrypt::verify(&input.password, &user.password)
            .context("verify password")?;
        if !matches {
            return Err(ApiError::unauthorized("Password is incorrect"));
        }

        let pair = generate_key_pair()?;
        let tokens = issue_token_pair(user.id, &user.email, &pair.private_key)?;
        self.keys
            .upsert(&new_key_record(user.id, pair, tokens.refresh_token.clone()))
            .await?;

        Ok(AccessOutput { user, tokens })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<K: KeyRepository> {
    pub keys: K,
}

impl<K: KeyRepository> LogoutUseCase<K> {
    pub async fn execute(&self, key_id: Uuid) -> Result<(), ApiError> {
        self.keys.delete_by_id(key_id).await
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository, K: KeyRepository> {
    pub users: U,
    pub keys: K,
}

impl<U: UserRepository, K: KeyRepository> RefreshTokenUseCase<U, K> {
    pub async fn execute(&self, refresh_token: &str) -> Result<AccessOutput, ApiError> {
        if refresh_token.is_empty() {
            return Err(ApiError::bad_request("Refresh token is required"));
        }

        // A token on any used list has been consumed before: someone is
        // replaying it. Invalidate every session for that user.
        if let Some(stolen) = self.keys.find_by_used_token(refresh_token).await? {
            tracing::warn!(user_id = %stolen.user_id, "refresh token replay detected");
            self.keys.delete_by_user_id(stolen.user_id).await?;
            return Err(ApiError::forbidden(
                "Something went wrong. Please log in again",
            ));
        }

        let record = self
            .keys
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;

        let info = validate_token(refresh_token, &record.public_key)
            .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

        let user = self
            .users
            .find_by_id(info.user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("User not registered"))?;

        // Reuse the stored key pair; only the refresh token rotates.
        let tokens = issue_token_pair(user.id, &user.email, &record.private_key)?;
        self.keys
            .rotate_refresh_token(record.id, &tokens.refresh_token, refresh_token)
            .await?;

        Ok(AccessOutput { user, tokens })
    }
}
