use axum::{Json, debug_handler, extract::{Query, State}};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, session};

use super::store::{self, Connection, ConnectionStatus};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    Sender,
    Receiver,
}

#[derive(Deserialize)]
pub(crate) struct ListQuery {
    status: Option<ConnectionStatus>,
    role: Option<Role>,
}

#[debug_handler]
pub(crate) async fn list_connections(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(ListQuery { status, role }): Query<ListQuery>,
) -> AppResult<Json<Vec<Connection>>> {
    let user_id = session::require_user(&session).await?;

    let mut connections = store::list_for_user(&db_pool, &user_id, status).await?;
    if let Some(role) = role {
        connections.retain(|c| match role {
            Role::Sender => c.sender_id == user_id,
            Role::Receiver => c.receiver_id == user_id,
        });
    }

    Ok(Json(connections))
}
