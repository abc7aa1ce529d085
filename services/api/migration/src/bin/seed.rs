//! Inserts the sample course catalog. Run after migrations:
//! `DATABASE_URL=... cargo run -p campus-api-migration --bin seed`

use chrono::Utc;
use sea_orm::{ActiveValue::Set, Database, EntityTrait};
use uuid::Uuid;

use campus_api_schema::courses;

#[tokio::main]
async fn main() {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let db = Database::connect(&database_url)
        .await
        .expect("failed to connect to database");

    let samples = [
        ("Intro to Node.js", "Basics of Node.js", "NODE101", "Beginner"),
        ("Advanced SQL", "Deep dive into SQL", "SQL201", "Intermediate"),
        (
            "FastAPI Crash Course",
            "Learn FastAPI quickly",
            "FASTAPI101",
            "Beginner",
        ),
        (
            "System Design 101",
            "Scalable system architecture",
            "SYS201",
            "Intermediate",
        ),
    ];

    let now = Utc::now();
    let models = samples.map(|(title, description, code, difficulty)| courses::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(title.to_owned()),
        description: Set(description.to_owned()),
        code: Set(code.to_owned()),
        difficulty: Set(difficulty.to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
    });

    let result = courses::Entity::insert_many(models)
        .exec(&db)
        .await
        .expect("failed to seed courses");

    println!("seeded courses up to {}", result.last_insert_id);
}
