use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

// profiles are written during account provisioning, this service only reads
// them; connections are fully owned here. The partial unique index is the
// duplicate-pair guard: at most one non-rejected row per unordered pair,
// whichever direction it was sent in.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS profiles (
        id TEXT PRIMARY KEY,
        full_name TEXT,
        avatar_url TEXT,
        profile_data TEXT
    )",
    "CREATE TABLE IF NOT EXISTS connections (
        id TEXT PRIMARY KEY,
        sender_id TEXT NOT NULL,
        receiver_id TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('pending','accepted','rejected')),
        created_at INTEGER NOT NULL,
        CHECK (sender_id <> receiver_id)
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS connections_live_pair ON connections (
        min(sender_id, receiver_id),
        max(sender_id, receiver_id)
    ) WHERE status <> 'rejected'",
    "CREATE INDEX IF NOT EXISTS connections_sender ON connections (sender_id)",
    "CREATE INDEX IF NOT EXISTS connections_receiver ON connections (receiver_id)",
];

pub async fn connect(url: &str) -> sqlx::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(url)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> sqlx::Result<()> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
