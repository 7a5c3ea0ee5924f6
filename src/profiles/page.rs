use axum::{Json, debug_handler, extract::{Path, State}};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppError, AppResult, session};

use super::{model::Profile, resolver};

#[debug_handler]
pub(crate) async fn profile(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Json<Profile>> {
    session::require_user(&session).await?;

    // placeholder semantics are for batch derivation only; asking for a
    // specific absent profile is a plain 404
    let record = resolver::get_record(&db_pool, &profile_id)
        .await?
        .ok_or(AppError::NotFound("profile"))?;

    Ok(Json(record.resolve()))
}
