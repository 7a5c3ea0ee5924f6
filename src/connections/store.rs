use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A directed connection request. `pending` may move to `accepted` or
/// `rejected`, both terminal; rows are never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Connection {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub status: ConnectionStatus,
    pub created_at: i64,
}

impl Connection {
    /// The endpoint that is not `viewer_id`.
    pub fn other_party(&self, viewer_id: &str) -> &str {
        if self.sender_id == viewer_id {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }
}

/// Insert a new pending request. The duplicate-pair rule is the store's
/// `connections_live_pair` unique index, so a create/create race in either
/// direction loses here rather than producing a second live row.
pub async fn create(pool: &SqlitePool, sender_id: &str, receiver_id: &str) -> AppResult<Connection> {
    if sender_id == receiver_id {
        return Err(AppError::Validation("cannot connect to yourself".to_owned()));
    }

    let connection = Connection {
        id: Uuid::now_v7().to_string(),
        sender_id: sender_id.to_owned(),
        receiver_id: receiver_id.to_owned(),
        status: ConnectionStatus::Pending,
        created_at: time::OffsetDateTime::now_utc().unix_timestamp(),
    };

    let inserted = sqlx::query(
        "INSERT INTO connections (id,sender_id,receiver_id,status,created_at) VALUES (?,?,?,?,?)",
    )
    .bind(&connection.id)
    .bind(&connection.sender_id)
    .bind(&connection.receiver_id)
    .bind(connection.status)
    .bind(connection.created_at)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => Ok(connection),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AppError::DuplicateConnection)
        }
        Err(sqlx::Error::Database(db)) if db.is_check_violation() => {
            Err(AppError::Validation("cannot connect to yourself".to_owned()))
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn get_by_id(pool: &SqlitePool, id: &str) -> AppResult<Connection> {
    get_optional(pool, id)
        .await?
        .ok_or(AppError::NotFound("connection"))
}

async fn get_optional(pool: &SqlitePool, id: &str) -> AppResult<Option<Connection>> {
    Ok(sqlx::query_as(
        "SELECT id,sender_id,receiver_id,status,created_at FROM connections WHERE id=?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Connections where `user_id` is either endpoint, in creation order
/// (`created_at` ascending, id as the tiebreak).
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: &str,
    status: Option<ConnectionStatus>,
) -> AppResult<Vec<Connection>> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as(
                "SELECT id,sender_id,receiver_id,status,created_at FROM connections
                 WHERE (sender_id=? OR receiver_id=?) AND status=?
                 ORDER BY created_at, id",
            )
            .bind(user_id)
            .bind(user_id)
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as(
                "SELECT id,sender_id,receiver_id,status,created_at FROM connections
                 WHERE sender_id=? OR receiver_id=?
                 ORDER BY created_at, id",
            )
            .bind(user_id)
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Conditional status write: succeeds only if the row still has `expected`
/// status at write time. Zero rows affected means either the row is gone
/// (`NotFound`) or another caller got there first (`Conflict`).
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    expected: ConnectionStatus,
    new_status: ConnectionStatus,
) -> AppResult<Connection> {
    let result = sqlx::query("UPDATE connections SET status=? WHERE id=? AND status=?")
        .bind(new_status)
        .bind(id)
        .bind(expected)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return match get_optional(pool, id).await? {
            None => Err(AppError::NotFound("connection")),
            Some(_) => Err(AppError::Conflict),
        };
    }

    get_by_id(pool, id).await
}
