use campuslink::db;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

// a single connection so every query sees the same :memory: database
pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    db::migrate(&pool).await.expect("migrate");
    pool
}

pub async fn seed_profile(
    pool: &SqlitePool,
    id: &str,
    full_name: Option<&str>,
    profile_data: Option<&str>,
) {
    sqlx::query("INSERT INTO profiles (id,full_name,avatar_url,profile_data) VALUES (?,?,NULL,?)")
        .bind(id)
        .bind(full_name)
        .bind(profile_data)
        .execute(pool)
        .await
        .expect("seed profile");
}
