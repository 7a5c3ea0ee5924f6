use axum::{Json, Router, debug_handler, extract::State, http::StatusCode, routing::post};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, AppState, profiles};

pub const USER_ID: &str = "user_id";

/// The actor id for this request, or `Unauthorized` if there is no signed-in
/// session. This is the only identity input the core ever reads.
pub async fn require_user(session: &Session) -> AppResult<String> {
    session
        .get::<String>(USER_ID)
        .await?
        .ok_or(AppError::Unauthorized)
}

#[derive(Deserialize)]
pub(crate) struct StartSessionRequest {
    user_id: String,
}

// Credential checks belong to the campus auth provider sitting in front of
// this service; this endpoint only binds an already-provisioned profile id
// to the session cookie.
#[debug_handler]
pub(crate) async fn start(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Json(StartSessionRequest { user_id }): Json<StartSessionRequest>,
) -> AppResult<StatusCode> {
    if profiles::get_record(&db_pool, &user_id).await?.is_none() {
        return Err(AppError::NotFound("profile"));
    }

    session.insert(USER_ID, user_id.clone()).await?;
    tracing::info!(user = %user_id, "session started");

    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler]
pub(crate) async fn end(session: Session) -> AppResult<StatusCode> {
    session.clear().await;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(start).delete(end))
}
