use ferrum::db;
use ferrum::db::models::NewExercise;
use ferrum::db::operations::{create_user, insert_exercise};
use sqlx::SqlitePool;

pub async fn test_pool() -> SqlitePool {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    db::init_database(&pool)
        .await
        .expect("Failed to apply migrations");
    pool
}

pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    create_user(
        pool,
        username,
        &format!("{username}@example.com"),
        "$argon2id$test-hash",
    )
    .await
    .expect("Failed to seed user")
    .user_id
}

pub async fn seed_exercise(pool: &SqlitePool, title: &str) -> i64 {
    insert_exercise(
        pool,
        &NewExercise {
            title: title.to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to seed exercise")
    .exercise_id
}
