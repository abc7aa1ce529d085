use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use campus_api::domain::repository::{
    CourseRepository, EnrollmentRepository, KeyRepository, UserRepository,
};
use campus_api::domain::types::{Course, CourseFilter, Enrollment, KeyRecord, User};
use campus_core::error::ApiError;
use campus_domain::course::{CourseSort, CourseSortField, Difficulty};
use campus_domain::pagination::{PageQuery, Sort};

/// Low bcrypt cost for fixtures; production uses `bcrypt::DEFAULT_COST`.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_user(email: &str, password: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password: bcrypt::hash(password, TEST_BCRYPT_COST).unwrap(),
        name: Some("Test User".to_owned()),
        role: "user".to_owned(),
        created_at: now,
        updated_at: now,
    }
}

/// Course fixture; `age_days` pushes `created_at` into the past so listing
/// tests get distinct sort keys.
pub fn test_course(title: &str, code: &str, difficulty: Difficulty, age_days: i64) -> Course {
    let at = Utc::now() - Duration::days(age_days);
    Course {
        id: Uuid::now_v7(),
        title: title.to_owned(),
        description: format!("{title} description"),
        code: code.to_owned(),
        difficulty,
        created_at: at,
        updated_at: at,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockKeyRepo ──────────────────────────────────────────────────────────────

pub struct MockKeyRepo {
    pub records: Arc<Mutex<Vec<KeyRecord>>>,
}

impl MockKeyRepo {
    pub fn new(records: Vec<KeyRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn records_handle(&self) -> Arc<Mutex<Vec<KeyRecord>>> {
        Arc::clone(&self.records)
    }
}

impl KeyRepository for MockKeyRepo {
    async fn upsert(&self, record: &KeyRecord) -> Result<(), ApiError> {
        let mut records = self.records.lock().unwrap();
        records.retain(|r| r.user_id != record.user_id);
        records.push(record.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.refresh_token == token)
            .cloned())
    }

    async fn find_by_used_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.has_used(token))
            .cloned())
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        new_token: &str,
        used_token: &str,
    ) -> Result<(), ApiError> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.refresh_token = new_token.to_owned();
            record.refresh_tokens_used.push(used_token.to_owned());
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ApiError> {
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), ApiError> {
        self.records.lock().unwrap().retain(|r| r.user_id != user_id);
        Ok(())
    }
}

// ── MockCourseRepo ───────────────────────────────────────────────────────────

pub struct MockCourseRepo {
    pub courses: Arc<Mutex<Vec<Course>>>,
}

impl MockCourseRepo {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses: Arc::new(Mutex::new(courses)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn courses_handle(&self) -> Arc<Mutex<Vec<Course>>> {
        Arc::clone(&self.courses)
    }
}

impl CourseRepository for MockCourseRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, ApiError> {
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    async fn create(&self, course: &Course) -> Result<(), ApiError> {
        self.courses.lock().unwrap().push(course.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: &CourseFilter,
        sort: CourseSort,
        page: PageQuery,
    ) -> Result<(Vec<Course>, u64), ApiError> {
        let mut matched: Vec<Course> = self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                filter.difficulty.is_none_or(|d| c.difficulty == d)
                    && filter
                        .title
                        .as_deref()
                        .is_none_or(|t| c.title.to_lowercase().contains(&t.to_lowercase()))
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let ord = match sort.field {
                CourseSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                CourseSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                CourseSortField::Title => a.title.cmp(&b.title),
                CourseSortField::Code => a.code.cmp(&b.code),
                CourseSortField::Difficulty => a.difficulty.as_str().cmp(b.difficulty.as_str()),
            };
            match sort.order {
                Sort::Asc => ord,
                Sort::Desc => ord.reverse(),
            }
        });

        let total = matched.len() as u64;
        let paged = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((paged, total))
    }
}

// ── MockEnrollmentRepo ───────────────────────────────────────────────────────

/// Shares the course list with [`MockCourseRepo`] so `list_by_student`
/// can join enrollments to courses.
pub struct MockEnrollmentRepo {
    pub enrollments: Arc<Mutex<Vec<Enrollment>>>,
    pub courses: Arc<Mutex<Vec<Course>>>,
}

impl MockEnrollmentRepo {
    pub fn new(courses: Arc<Mutex<Vec<Course>>>) -> Self {
        Self {
            enrollments: Arc::new(Mutex::new(vec![])),
            courses,
        }
    }

    pub fn enrollments_handle(&self) -> Arc<Mutex<Vec<Enrollment>>> {
        Arc::clone(&self.enrollments)
    }
}

impl EnrollmentRepository for MockEnrollmentRepo {
    async fn find_by_student_and_course(
        &self,
        student_email: &str,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, ApiError> {
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.student_email == student_email && e.course_id == course_id)
            .cloned())
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), ApiError> {
        self.enrollments.lock().unwrap().push(enrollment.clone());
        Ok(())
    }

    async fn list_by_student(
        &self,
        student_email: &str,
    ) -> Result<Vec<(Enrollment, Course)>, ApiError> {
        let courses = self.courses.lock().unwrap();
        let mut rows: Vec<(Enrollment, Course)> = self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.student_email == student_email)
            .map(|e| {
                let course = courses
                    .iter()
                    .find(|c| c.id == e.course_id)
                    .expect("enrollment references a known course")
                    .clone();
                (e.clone(), course)
            })
            .collect();
        rows.sort_by(|a, b| b.0.enrolled_at.cmp(&a.0.enrolled_at));
        Ok(rows)
    }
}
