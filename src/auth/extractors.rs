use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::{debug, error};

use crate::auth::dto::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Resolves the `x-access-token` header into the caller's user record,
/// filtered to activated users. Handlers receive a pre-resolved identity
/// instead of wrapping themselves in auth middleware.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("x-access-token")
            .and_then(|v| v.to_str().ok());
        let Some(token) = token else {
            error!("Required token is missing.");
            return Err(ApiError::Credential("Required token is missing.".into()));
        };

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token)?;

        let user = User::find_activated_by_id(&state.db, claims.id)
            .await
            .map_err(|e| {
                ApiError::database("There are errors when find user in database.", e)
            })?;
        let Some(user) = user else {
            error!(user_id = %claims.id, "user doesn't exist or is not activated");
            return Err(ApiError::NotFound(
                "This user doesn't exist or is not activated. Please contact your administrator."
                    .into(),
            ));
        };

        debug!(user_id = %user.id, "received token is valid");
        Ok(CurrentUser(user))
    }
}
