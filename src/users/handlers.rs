use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::dto::MessageResponse;
use crate::users::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:user_id", get(find_user).put(update_user))
        .route("/users/:user_id/reset-password", put(reset_password))
        .route("/users/:user_id/deactivation", put(deactivate_user))
}

/// POST /users — admin only.
#[instrument(skip(state, caller, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let payload = payload.map(|Json(v)| v);
    let message = services::create_user(&state.db, &caller, payload.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /users/:user_id — self, or anyone for admins.
#[instrument(skip(state, caller))]
pub async fn find_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = services::find_user_by_id(&state.db, &caller, &user_id).await?;
    Ok(Json(user))
}

/// PUT /users/:user_id — admin-only full-profile replacement.
#[instrument(skip(state, caller, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
    payload: Option<Json<Value>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let payload = payload.map(|Json(v)| v);
    let message =
        services::modify_user(&state.db, &caller, payload.as_ref(), &user_id).await?;
    Ok(Json(message))
}

/// PUT /users/:user_id/reset-password — self, or anyone for admins.
#[instrument(skip(state, caller, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
    payload: Option<Json<Value>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let payload = payload.map(|Json(v)| v);
    let message =
        services::change_password(&state.db, &caller, payload.as_ref(), &user_id).await?;
    Ok(Json(message))
}

/// PUT /users/:user_id/deactivation — admin-only soft delete.
#[instrument(skip(state, caller))]
pub async fn deactivate_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = services::deactivate_user_by_id(&state.db, &caller, &user_id).await?;
    Ok(Json(message))
}
