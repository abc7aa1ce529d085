use chrono::{DateTime, Utc};
use uuid::Uuid;

use campus_domain::course::Difficulty;

/// Registered account. `password` is the bcrypt hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course catalog entry.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment of a student into a course; one per (student, course) pair.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: Uuid,
    pub student_email: String,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Per-user session key material. Replaced wholesale on login/signup,
/// rotated on refresh, deleted on logout.
#[derive(Debug, Clone)]
pub struct KeyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// RSA public key (SPKI PEM).
    pub public_key: String,
    /// RSA private key (PKCS#8 PEM).
    pub private_key: String,
    /// Currently valid refresh token.
    pub refresh_token: String,
    /// Refresh tokens already consumed; a match here means replay.
    pub refresh_tokens_used: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeyRecord {
    pub fn has_used(&self, token: &str) -> bool {
        self.refresh_tokens_used.iter().any(|t| t == token)
    }
}

/// Filters accepted by the course listing.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Exact difficulty match.
    pub difficulty: Option<Difficulty>,
    /// Case-insensitive title substring.
    pub title: Option<String>,
}
