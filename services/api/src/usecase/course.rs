//! Course creation and listing.

use chrono::Utc;
use uuid::Uuid;

use campus_core::error::ApiError;
use campus_domain::course::{CourseSort, Difficulty};
use campus_domain::pagination::{PageMeta, PageQuery};

use crate::domain::repository::CourseRepository;
use crate::domain::types::{Course, CourseFilter};

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub title: String,
    pub description: String,
    pub code: String,
    /// `None` falls back to [`Difficulty::Beginner`].
    pub difficulty: Option<Difficulty>,
}

pub struct CreateCourseUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> CreateCourseUseCase<C> {
    pub async fn execute(&self, input: CreateCourseInput) -> Result<Course, ApiError> {
        if input.title.is_empty() {
            return Err(ApiError::bad_request("Title is required"));
        }
        if input.description.is_empty() {
            return Err(ApiError::bad_request("Description is required"));
        }
        if input.code.is_empty() {
            return Err(ApiError::bad_request("Code is required"));
        }

        if self.courses.find_by_code(&input.code).await?.is_some() {
            return Err(ApiError::conflict("Course code already exists"));
        }

        let now = Utc::now();
        let course = Course {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            code: input.code,
            difficulty: input.difficulty.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.courses.create(&course).await?;
        Ok(course)
    }
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesInput {
    pub filter: CourseFilter,
    pub sort: CourseSort,
    pub page: PageQuery,
}

#[derive(Debug)]
pub struct ListCoursesOutput {
    pub courses: Vec<Course>,
    pub meta: PageMeta,
}

pub struct ListCoursesUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ListCoursesUseCase<C> {
    pub async fn execute(&self, input: ListCoursesInput) -> Result<ListCoursesOutput, ApiError> {
        let page = input.page.clamped();
        let (courses, total) = self.courses.list(&input.filter, input.sort, page).await?;
        Ok(ListCoursesOutput {
            courses,
            meta: PageMeta::new(total, page),
        })
    }
}
