use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use campus_core::error::ApiError;
use campus_domain::course::{CourseSort, CourseSortField, Difficulty};
use campus_domain::pagination::{PageQuery, Sort};

use crate::domain::types::{Course, CourseFilter};
use crate::middleware::AuthenticatedClient;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, ListCoursesInput, ListCoursesUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub code: String,
    pub difficulty: Difficulty,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title,
            description: course.description,
            code: course.code,
            difficulty: course.difficulty,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ── GET /api/courses ─────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListCoursesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub select: Option<String>,
    pub difficulty: Option<String>,
    pub title: Option<String>,
}

/// Keep only the fields named by `select=` on each serialized course.
/// Unknown field names simply match nothing.
fn project_fields(mut value: serde_json::Value, fields: &[&str]) -> serde_json::Value {
    if let serde_json::Value::Object(ref mut map) = value {
        map.retain(|key, _| fields.contains(&key.as_str()));
    }
    value
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let difficulty = query
        .difficulty
        .as_deref()
        .map(|s| Difficulty::parse(s).ok_or_else(|| ApiError::bad_request("Invalid difficulty value")))
        .transpose()?;
    let field = query
        .sort_by
        .as_deref()
        .map(|s| CourseSortField::parse(s).ok_or_else(|| ApiError::bad_request("Invalid sort field")))
        .transpose()?
        .unwrap_or_default();
    let order = query
        .order
        .as_deref()
        .map(Sort::parse_or_default)
        .unwrap_or(Sort::Desc);

    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    let out = usecase
        .execute(ListCoursesInput {
            filter: CourseFilter {
                difficulty,
                title: query.title,
            },
            sort: CourseSort { field, order },
            page: PageQuery {
                page: query.page.unwrap_or(1),
                limit: query.limit.unwrap_or(10),
            },
        })
        .await?;

    let mut data: Vec<serde_json::Value> = Vec::with_capacity(out.courses.len());
    for course in out.courses {
        let value = serde_json::to_value(CourseResponse::from(course))
            .map_err(|e| ApiError::Internal(e.into()))?;
        data.push(value);
    }
    if let Some(select) = query.select.as_deref() {
        let fields: Vec<&str> = select.split(',').map(str::trim).collect();
        data = data
            .into_iter()
            .map(|value| project_fields(value, &fields))
            .collect();
    }

    Ok(Json(json!({ "data": data, "meta": out.meta })))
}

// ── POST /api/courses ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    pub difficulty: Option<String>,
}

pub async fn create_course(
    _client: AuthenticatedClient,
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let difficulty = body
        .difficulty
        .as_deref()
        .map(|s| Difficulty::parse(s).ok_or_else(|| ApiError::bad_request("Invalid difficulty value")))
        .transpose()?;

    let usecase = CreateCourseUseCase {
        courses: state.course_repo(),
    };
    let course = usecase
        .execute(CreateCourseInput {
            title: body.title,
            description: body.description,
            code: body.code,
            difficulty,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(course))))
}
