use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use campus_core::error::ApiError;

use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{EnrollInput, EnrollUseCase, ListStudentEnrollmentsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: String,
    pub student_email: String,
    pub course_id: String,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub course: CourseResponse,
}

// ── POST /api/enrollments ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollRequest {
    #[serde(rename = "studentEmail", default)]
    pub student_email: String,
    #[serde(rename = "courseId", default)]
    pub course_id: String,
}

pub async fn enroll(
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let usecase = EnrollUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
    };
    let out = usecase
        .execute(EnrollInput {
            student_email: body.student_email,
            course_id: body.course_id,
        })
        .await?;

    let response = EnrollmentResponse {
        id: out.enrollment.id.to_string(),
        student_email: out.enrollment.student_email,
        course_id: out.enrollment.course_id.to_string(),
        enrolled_at: out.enrollment.enrolled_at,
        course: CourseResponse::from(out.course),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

// ── GET /api/enrollments/students ────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct StudentEnrollmentsQuery {
    pub email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollmentsResponse {
    pub student_email: String,
    pub total_enrollments: usize,
    pub enrollments: Vec<EnrollmentResponse>,
}

pub async fn student_enrollments(
    State(state): State<AppState>,
    Query(query): Query<StudentEnrollmentsQuery>,
) -> Result<Json<StudentEnrollmentsResponse>, ApiError> {
    let email = match query.email.as_deref() {
        Some(email) if !email.is_empty() => email.to_owned(),
        _ => {
            return Err(ApiError::bad_request("Invalid or missing email parameter"));
        }
    };

    let usecase = ListStudentEnrollmentsUseCase {
        enrollments: state.enrollment_repo(),
    };
    let rows = usecase.execute(&email).await?;

    let enrollments: Vec<EnrollmentResponse> = rows
        .into_iter()
        .map(|(enrollment, course)| EnrollmentResponse {
            id: enrollment.id.to_string(),
            student_email: enrollment.student_email,
            course_id: enrollment.course_id.to_string(),
            enrolled_at: enrollment.enrolled_at,
            course: CourseResponse::from(course),
        })
        .collect();

    Ok(Json(StudentEnrollmentsResponse {
        student_email: email,
        total_enrollments: enrollments.len(),
        enrollments,
    }))
}
