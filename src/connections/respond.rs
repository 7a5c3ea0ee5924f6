use axum::{Json, debug_handler, extract::{Path, State}};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, session};

use super::{lifecycle::{self, Action}, store::Connection};

#[derive(Deserialize)]
pub(crate) struct RespondRequest {
    action: Action,
}

#[debug_handler]
pub(crate) async fn respond(
    Path(connection_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(RespondRequest { action }): Json<RespondRequest>,
) -> AppResult<Json<Connection>> {
    let actor_id = session::require_user(&session).await?;

    let connection = lifecycle::transition(&db_pool, &connection_id, &actor_id, action).await?;
    tracing::info!(connection = %connection.id, actor = %actor_id, status = ?connection.status, "connection responded");

    Ok(Json(connection))
}
