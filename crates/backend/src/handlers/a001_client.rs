use axum::extract::{Query, State};
use axum::Json;
use contracts::domain::a001_client::Client;
use serde::Deserialize;

use crate::domain::a001_client;
use crate::system::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/clients/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Client>>, axum::http::StatusCode> {
    match a001_client::service::search(state.store.as_ref(), &params.q).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Client search failed: {}", e);
            Err(axum::http::StatusCode::BAD_GATEWAY)
        }
    }
}
