use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use campus_core::health::{healthz, readyz};
use campus_core::middleware::{error_path, request_id_layer};

use crate::handlers::{
    auth::{login, logout, refresh_token, signup},
    course::{create_course, list_courses},
    enrollment::{enroll, student_enrollments},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/refresh-token", post(refresh_token))
        // Courses
        .route("/api/courses", get(list_courses))
        .route("/api/courses", post(create_course))
        // Enrollments
        .route("/api/enrollments", post(enroll))
        .route("/api/enrollments/students", get(student_enrollments))
        .layer(axum::middleware::from_fn(error_path))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
