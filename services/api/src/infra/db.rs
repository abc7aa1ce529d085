use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Func, OnConflict},
};
use uuid::Uuid;

use campus_api_schema::{courses, enrollments, keys, users};
use campus_core::error::ApiError;
use campus_domain::course::{CourseSort, CourseSortField, Difficulty};
use campus_domain::pagination::{PageQuery, Sort};

use crate::domain::repository::{
    CourseRepository, EnrollmentRepository, KeyRepository, UserRepository,
};
use crate::domain::types::{Course, CourseFilter, Enrollment, KeyRecord, User};

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let am = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            name: Set(user.name.clone()),
            role: Set(user.role.clone()),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };
        users::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password: model.password,
        name: model.name,
        role: model.role,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Key repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbKeyRepository {
    pub db: DatabaseConnection,
}

impl KeyRepository for DbKeyRepository {
    async fn upsert(&self, record: &KeyRecord) -> Result<(), ApiError> {
        let am = keys::ActiveModel {
            id: Set(record.id),
            user_id: Set(record.user_id),
            public_key: Set(record.public_key.clone()),
            private_key: Set(record.private_key.clone()),
            refresh_token: Set(record.refresh_token.clone()),
            refresh_tokens_used: Set(record.refresh_tokens_used.clone()),
            created_at: Set(record.created_at),
            updated_at: Set(record.updated_at),
        };
        keys::Entity::insert(am)
            .on_conflict(
                OnConflict::column(keys::Column::UserId)
                    .update_columns([
                        keys::Column::PublicKey,
                        keys::Column::PrivateKey,
                        keys::Column::RefreshToken,
                        keys::Column::RefreshTokensUsed,
                        keys::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .context("upsert key record")?;
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<KeyRecord>, ApiError> {
        let model = keys::Entity::find()
            .filter(keys::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find key record by user id")?;
        Ok(model.map(key_from_model))
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError> {
        let model = keys::Entity::find()
            .filter(keys::Column::RefreshToken.eq(token))
            .one(&self.db)
            .await
            .context("find key record by refresh token")?;
        Ok(model.map(key_from_model))
    }

    async fn find_by_used_token(&self, token: &str) -> Result<Option<KeyRecord>, ApiError> {
        let model = keys::Entity::find()
            .filter(Expr::cust_with_values(
                "? = ANY(\"refresh_tokens_used\")",
                [token],
            ))
            .one(&self.db)
            .await
            .context("find key record by used token")?;
        Ok(model.map(key_from_model))
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        new_token: &str,
        used_token: &str,
    ) -> Result<(), ApiError> {
        keys::Entity::update_many()
            .col_expr(keys::Column::RefreshToken, Expr::value(new_token))
            .col_expr(
                keys::Column::RefreshTokensUsed,
                Expr::cust_with_values("array_append(\"refresh_tokens_used\", ?)", [used_token]),
            )
            .col_expr(keys::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(keys::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("rotate refresh token")?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ApiError> {
        keys::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete key record")?;
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<(), ApiError> {
        keys::Entity::delete_many()
            .filter(keys::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete key records for user")?;
        Ok(())
    }
}

fn key_from_model(model: keys::Model) -> KeyRecord {
    KeyRecord {
        id: model.id,
        user_id: model.user_id,
        public_key: model.public_key,
        private_key: model.private_key,
        refresh_token: model.refresh_token,
        refresh_tokens_used: model.refresh_tokens_used,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        model.map(course_from_model).transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, ApiError> {
        let model = courses::Entity::find()
            .filter(courses::Column::Code.eq(code))
            .one(&self.db)
            .await
            .context("find course by code")?;
        model.map(course_from_model).transpose()
    }

    async fn create(&self, course: &Course) -> Result<(), ApiError> {
        let am = courses::ActiveModel {
            id: Set(course.id),
            title: Set(course.title.clone()),
            description: Set(course.description.clone()),
            code: Set(course.code.clone()),
            difficulty: Set(course.difficulty.as_str().to_owned()),
            created_at: Set(course.created_at),
            updated_at: Set(course.updated_at),
        };
        courses::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create course")?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &CourseFilter,
        sort: CourseSort,
        page: PageQuery,
    ) -> Result<(Vec<Course>, u64), ApiError> {
        let mut query = courses::Entity::find();

        if let Some(difficulty) = filter.difficulty {
            query = query.filter(courses::Column::Difficulty.eq(difficulty.as_str()));
        }
        if let Some(title) = &filter.title {
            // Case-insensitive substring match, portable across backends.
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((
                    courses::Entity,
                    courses::Column::Title,
                ))))
                .like(format!("%{}%", title.to_lowercase())),
            );
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count courses")?;

        let column = match sort.field {
            CourseSortField::CreatedAt => courses::Column::CreatedAt,
            CourseSortField::UpdatedAt => courses::Column::UpdatedAt,
            CourseSortField::Title => courses::Column::Title,
            CourseSortField::Code => courses::Column::Code,
            CourseSortField::Difficulty => courses::Column::Difficulty,
        };
        let order = match sort.order {
            Sort::Asc => Order::Asc,
            Sort::Desc => Order::Desc,
        };

        let models = query
            .order_by(column, order)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list courses")?;

        let courses = models
            .into_iter()
            .map(course_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((courses, total))
    }
}

fn course_from_model(model: courses::Model) -> Result<Course, ApiError> {
    let difficulty = Difficulty::parse(&model.difficulty).ok_or_else(|| {
        ApiError::Internal(anyhow!(
            "unknown difficulty {:?} on course {}",
            model.difficulty,
            model.id
        ))
    })?;
    Ok(Course {
        id: model.id,
        title: model.title,
        description: model.description,
        code: model.code,
        difficulty,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn find_by_student_and_course(
        &self,
        student_email: &str,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, ApiError> {
        let model = enrollments::Entity::find()
            .filter(enrollments::Column::StudentEmail.eq(student_email))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .context("find enrollment by student and course")?;
        Ok(model.map(enrollment_from_model))
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), ApiError> {
        let am = enrollments::ActiveModel {
            id: Set(enrollment.id),
            student_email: Set(enrollment.student_email.clone()),
            course_id: Set(enrollment.course_id),
            enrolled_at: Set(enrollment.enrolled_at),
        };
        enrollments::Entity::insert(am)
            .exec(&self.db)
            .await
            .context("create enrollment")?;
        Ok(())
    }

    async fn list_by_student(
        &self,
        student_email: &str,
    ) -> Result<Vec<(Enrollment, Course)>, ApiError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentEmail.eq(student_email))
            .find_also_related(courses::Entity)
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await
            .context("list enrollments by student")?;

        rows.into_iter()
            .map(|(enrollment, course)| {
                // The FK guarantees a course row; a miss means corrupt data.
                let course = course
                    .ok_or_else(|| anyhow!("enrollment {} has no course row", enrollment.id))?;
                Ok((enrollment_from_model(enrollment), course_from_model(course)?))
            })
            .collect()
    }
}

fn enrollment_from_model(model: enrollments::Model) -> Enrollment {
    Enrollment {
        id: model.id,
        student_email: model.student_email,
        course_id: model.course_id,
        enrolled_at: model.enrolled_at,
    }
}
