pub mod lifecycle;
pub mod store;

mod list;
mod new;
mod respond;

use axum::{Router, routing::{get, patch}};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_connections).post(new::new_connection))
        .route("/{id}", patch(respond::respond))
}
