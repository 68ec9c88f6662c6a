use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::movies::services;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/autocomplete/:resource/:keywords",
            get(autocomplete_resource),
        )
        .route("/movies/:movie_id", get(get_movie_by_id))
}

/// GET /autocomplete/:resource/:keywords — keywords are `_`-separated.
#[instrument(skip(state))]
pub async fn autocomplete_resource(
    State(state): State<AppState>,
    Path((resource, keywords)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let result =
        services::search_movie_or_location_by_keyword(&state.db, &resource, &keywords).await?;
    Ok(Json(result))
}

/// GET /movies/:movie_id — full record plus poster/trailer links.
#[instrument(skip(state))]
pub async fn get_movie_by_id(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let movie = services::find_movie_by_id(&state.db, &movie_id).await?;
    Ok(Json(movie))
}
