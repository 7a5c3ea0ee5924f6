use axum::{Json, debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, profiles, session};

use super::store::{self, Connection};

#[derive(Deserialize)]
pub(crate) struct NewConnectionRequest {
    receiver_id: String,
}

#[debug_handler]
pub(crate) async fn new_connection(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(NewConnectionRequest { receiver_id }): Json<NewConnectionRequest>,
) -> AppResult<(StatusCode, Json<Connection>)> {
    let sender_id = session::require_user(&session).await?;

    if profiles::get_record(&db_pool, &receiver_id).await?.is_none() {
        return Err(AppError::NotFound("profile"));
    }

    let connection = store::create(&db_pool, &sender_id, &receiver_id).await?;
    tracing::info!(connection = %connection.id, sender = %sender_id, receiver = %receiver_id, "connection requested");

    Ok((StatusCode::CREATED, Json(connection)))
}
