use axum::{
    extract::{FromRef, State},
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{JwtKeys, TokenResponse};
use crate::auth::services::{login, parse_basic_auth};
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", get(login_handler))
}

/// GET /login with Basic auth; returns `{token}` on success.
#[instrument(skip(state, headers))]
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let credentials = parse_basic_auth(
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );
    let keys = JwtKeys::from_ref(&state);
    let response = login(&state.db, &keys, credentials).await?;
    Ok(Json(response))
}
