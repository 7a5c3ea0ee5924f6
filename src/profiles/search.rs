use std::collections::HashSet;

use axum::{Json, debug_handler, extract::{Query, State}};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, connections, session};

use super::model::{Profile, ProfileRecord};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Name,
    Skill,
    Branch,
    Year,
}

/// Case-insensitive substring match over one profile attribute. An empty
/// query matches the whole directory; exclusions are applied regardless.
pub async fn search(
    pool: &SqlitePool,
    query: &str,
    search_type: SearchType,
    exclude: &HashSet<String>,
) -> AppResult<Vec<Profile>> {
    let records: Vec<ProfileRecord> =
        sqlx::query_as("SELECT id,full_name,avatar_url,profile_data FROM profiles ORDER BY id")
            .fetch_all(pool)
            .await?;

    let needle = query.trim().to_lowercase();
    Ok(records
        .into_iter()
        .filter(|record| !exclude.contains(&record.id))
        .map(ProfileRecord::resolve)
        .filter(|profile| needle.is_empty() || matches(profile, search_type, &needle))
        .collect())
}

fn matches(profile: &Profile, search_type: SearchType, needle: &str) -> bool {
    match search_type {
        SearchType::Name => profile.full_name.to_lowercase().contains(needle),
        SearchType::Skill => profile
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(needle)),
        SearchType::Branch => profile
            .branch
            .as_deref()
            .is_some_and(|branch| branch.to_lowercase().contains(needle)),
        SearchType::Year => profile
            .year
            .as_deref()
            .is_some_and(|year| year.to_lowercase().contains(needle)),
    }
}

#[derive(Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    q: String,
    #[serde(rename = "type", default)]
    search_type: SearchType,
}

#[debug_handler]
pub(crate) async fn search_profiles(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Query(SearchQuery { q, search_type }): Query<SearchQuery>,
) -> AppResult<Json<Vec<Profile>>> {
    let user_id = session::require_user(&session).await?;

    // hide the searcher and anyone they already have a live request with
    let mut exclude = HashSet::from([user_id.clone()]);
    for connection in connections::store::list_for_user(&db_pool, &user_id, None).await? {
        if connection.status != connections::store::ConnectionStatus::Rejected {
            exclude.insert(connection.other_party(&user_id).to_owned());
        }
    }

    Ok(Json(search(&db_pool, &q, search_type, &exclude).await?))
}
