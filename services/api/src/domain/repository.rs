#![allow(async_fn_in_trait)]

use uuid::Uuid;

use campus_core::error::ApiError;
use campus_domain::course::CourseSort;
use campus_domain::pagination::PageQuery;

use crate::domain::types::{Course, CourseFilter, Enrollment, KeyRecord, User};

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for per-user session key records.
pub trait KeyRepository: Send + Sync {
    /// Insert the record, replacing any existing one for the same user
    /// (the used-token list starts over).
    async fn upsert(&self, record: &KeyRecord) -> Result<(), ApiError>;

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, ApiError>;

    /// Find the record whose *current* refresh token is `token`.
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError>;

    /// Find the record whose used-token list contains `token` (replay detection).
    async fn find_by_used_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError>;

    /// Swap in a new refresh token, appending the consumed one to the used list.
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        new_token: &str,
        used_token: &str,
    ) -> Result<(), ApiError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ApiError>;

    /// Delete every record for a user (token-theft response).
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), ApiError>;
}

/// Repository for the course catalog.
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, ApiError>;
    async fn create(&self, course: &Course) -> Result<(), ApiError>;

    /// One filtered page of courses plus the total row count for the filter.
    /// `page` is assumed already clamped.
    async fn list(
        &self,
        filter: &CourseFilter,
        sort: CourseSort,
        page: PageQuery,
    ) -> Result<(Vec<Course>, u64), ApiError>;
}

/// Repository for enrollments.
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_student_and_course(
        &self,
        student_email: &str,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, ApiError>;

    async fn create(&self, enrollment: &Enrollment) -> Result<(), ApiError>;

    /// Enrollments for a student joined with their course, newest first.
    async fn list_by_student(
        &self,
        student_email: &str,
    ) -> Result<Vec<(Enrollment, Course)>, ApiError>;
}
