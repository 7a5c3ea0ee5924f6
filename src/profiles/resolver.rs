use std::{collections::HashMap, time::Duration};

use futures_util::future::join_all;
use sqlx::SqlitePool;

use crate::{AppError, AppResult};

use super::model::{Profile, ProfileRecord, placeholder};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn get_record(pool: &SqlitePool, id: &str) -> AppResult<Option<ProfileRecord>> {
    let record = tokio::time::timeout(
        LOOKUP_TIMEOUT,
        sqlx::query_as::<_, ProfileRecord>(
            "SELECT id,full_name,avatar_url,profile_data FROM profiles WHERE id=?",
        )
        .bind(id)
        .fetch_optional(pool),
    )
    .await
    .map_err(|_| AppError::Transient("profile lookup timed out".to_owned()))??;
    Ok(record)
}

/// Resolve a single profile, falling back to a placeholder if the row is
/// missing or the lookup fails. Never errors.
pub async fn resolve_one(pool: &SqlitePool, id: &str) -> Profile {
    match get_record(pool, id).await {
        Ok(Some(record)) => record.resolve(),
        Ok(None) => {
            tracing::warn!(profile = id, "profile missing, substituting placeholder");
            placeholder(id)
        }
        Err(err) => {
            tracing::warn!(profile = id, error = %err, "profile lookup failed, substituting placeholder");
            placeholder(id)
        }
    }
}

/// Resolve a batch of profiles in one concurrent fan-out. One failed lookup
/// yields a placeholder for that id only; siblings are unaffected.
pub async fn resolve_many(pool: &SqlitePool, ids: &[String]) -> HashMap<String, Profile> {
    join_all(ids.iter().map(|id| resolve_one(pool, id)))
        .await
        .into_iter()
        .map(|profile| (profile.id.clone(), profile))
        .collect()
}
