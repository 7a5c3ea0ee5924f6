mod model;
mod page;
mod resolver;
mod search;

pub use model::{Profile, ProfileRecord, UNKNOWN_USER, placeholder};
pub use resolver::{get_record, resolve_many, resolve_one};
pub use search::{SearchType, search};

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_profiles))
        .route("/{id}", get(page::profile))
}
