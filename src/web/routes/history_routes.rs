use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use super::super::{AppError, AppState};
use crate::db::models::HistoryEntry;
use crate::db::services::{self, HistoryFilter};

async fn history_handler(
    State(app_state): State<Arc<AppState>>,
    Query(filter): Query<HistoryFilter>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let entries = services::search_history(&app_state.db_pool, &filter).await?;
    Ok(Json(entries))
}

pub fn create_history_router() -> Router<Arc<AppState>> {
    Router::new().route("/historial-chequeos", get(history_handler))
}
