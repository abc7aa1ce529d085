//! Enrollment creation and per-student listing.

use chrono::Utc;
use uuid::Uuid;

use campus_core::error::ApiError;

use crate::domain::repository::{CourseRepository, EnrollmentRepository};
use crate::domain::types::{Course, Enrollment};

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollInput {
    pub student_email: String,
    /// Raw course id from the request body; anything that is not a UUID
    /// cannot reference an existing course and yields 404.
    pub course_id: String,
}

#[derive(Debug)]
pub struct EnrollOutput {
    pub enrollment: Enrollment,
    pub course: Course,
}

pub struct EnrollUseCase<C: CourseRepository, E: EnrollmentRepository> {
    pub courses: C,
    pub enrollments: E,
}

impl<C: CourseRepository, E: EnrollmentRepository> EnrollUseCase<C, E> {
    pub async fn execute(&self, input: EnrollInput) -> Result<EnrollOutput, ApiError> {
        if input.student_email.is_empty() {
            return Err(ApiError::bad_request("Student Email is required"));
        }
        if input.course_id.is_empty() {
            return Err(ApiError::bad_request("Course ID is required"));
        }

        let course_id = input
            .course_id
            .parse::<Uuid>()
            .map_err(|_| ApiError::not_found("Course not found"))?;

        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Course not found"))?;

        // Check-then-act; a concurrent duplicate slips through to the DB's
        // unique index and surfaces as 500, same as the check being racy.
        let existing = self
            .enrollments
            .find_by_student_and_course(&input.student_email, course.id)
            .await?;
        if existing.is_some() {
            return Err(ApiError::conflict(
                "Student already enrolled in this course",
            ));
        }

        let enrollment = Enrollment {
            id: Uuid::now_v7(),
            student_email: input.student_email,
            course_id: course.id,
            enrolled_at: Utc::now(),
        };
        self.enrollments.create(&enrollment).await?;

        Ok(EnrollOutput { enrollment, course })
    }
}

// ── ListStudentEnrollments ───────────────────────────────────────────────────

pub struct ListStudentEnrollmentsUseCase<E: EnrollmentRepository> {
    pub enrollments: E,
}

impl<E: EnrollmentRepository> ListStudentEnrollmentsUseCase<E> {
    pub async fn execute(
        &self,
        student_email: &str,
    ) -> Result<Vec<(Enrollment, Course)>, ApiError> {
        self.enrollments.list_by_student(student_email).await
    }
}
