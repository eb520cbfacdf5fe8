use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::Manager;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_managers))
}

async fn list_managers() -> Json<Vec<Manager>> {
    info!("GET /managers - Listing manager choices");
    Json(Manager::ALL.to_vec())
}
