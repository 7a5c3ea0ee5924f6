use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{AppError, AppResult};

use super::store::{self, Connection, ConnectionStatus};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Accept,
    Reject,
}

impl Action {
    fn target(self) -> ConnectionStatus {
        match self {
            Action::Accept => ConnectionStatus::Accepted,
            Action::Reject => ConnectionStatus::Rejected,
        }
    }
}

/// Move a pending connection to its terminal state. Only the receiver may
/// act, and only while the request is still pending; the write itself is
/// conditional, so of two racing calls exactly one returns the updated row
/// and the other gets `Conflict`.
pub async fn transition(
    pool: &SqlitePool,
    connection_id: &str,
    actor_id: &str,
    action: Action,
) -> AppResult<Connection> {
    let connection = store::get_by_id(pool, connection_id).await?;

    if connection.receiver_id != actor_id {
        return Err(AppError::Authorization);
    }
    if connection.status != ConnectionStatus::Pending {
        return Err(AppError::InvalidStateTransition);
    }

    store::update_status(pool, connection_id, ConnectionStatus::Pending, action.target()).await
}
