use axum::{Json, Router, debug_handler, extract::State, routing::get};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, AppState, connections::store::{self, ConnectionStatus}, profiles, session};

/// Derived view: one entry per accepted connection involving the viewer,
/// never persisted, recomputed per request.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntry {
    pub connection_id: String,
    pub peer_id: String,
    pub peer: profiles::Profile,
}

/// One entry per accepted connection, in connection creation order. Peer
/// profiles are resolved in a single batch fan-out; an unresolvable peer
/// gets a placeholder, so the output size always equals the number of
/// accepted connections.
pub async fn build_conversations(
    pool: &SqlitePool,
    viewer_id: &str,
) -> AppResult<Vec<ConversationEntry>> {
    let accepted = store::list_for_user(pool, viewer_id, Some(ConnectionStatus::Accepted)).await?;

    let peer_ids: Vec<String> = accepted
        .iter()
        .map(|c| c.other_party(viewer_id).to_owned())
        .collect();
    let mut peers = profiles::resolve_many(pool, &peer_ids).await;

    Ok(accepted
        .into_iter()
        .map(|connection| {
            let peer_id = connection.other_party(viewer_id).to_owned();
            let peer = peers
                .remove(&peer_id)
                .unwrap_or_else(|| profiles::placeholder(&peer_id));
            ConversationEntry {
                connection_id: connection.id,
                peer_id,
                peer,
            }
        })
        .collect())
}

#[debug_handler]
pub(crate) async fn conversations(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Json<Vec<ConversationEntry>>> {
    let viewer_id = session::require_user(&session).await?;
    Ok(Json(build_conversations(&db_pool, &viewer_id).await?))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(conversations))
}
