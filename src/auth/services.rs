use base64ct::{Base64, Encoding};
use sqlx::PgPool;
use tracing::{debug, error, info};

use crate::auth::dto::{BasicCredentials, JwtKeys, TokenResponse};
use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::users::repo::User;

/// Decodes an `Authorization: Basic <base64(user:pass)>` header value.
/// Anything unparsable counts as missing credentials.
pub fn parse_basic_auth(header: Option<&str>) -> Option<BasicCredentials> {
    let encoded = header?.strip_prefix("Basic ")?;
    let decoded = Base64::decode_vec(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Verifies Basic-auth credentials against the activated-user table and
/// issues a signed token on success.
pub async fn login(
    db: &PgPool,
    keys: &JwtKeys,
    credentials: Option<BasicCredentials>,
) -> Result<TokenResponse, ApiError> {
    let credentials =
        credentials.filter(|c| !c.username.is_empty() && !c.password.is_empty());
    let Some(credentials) = credentials else {
        error!("Missing username or password.");
        return Err(ApiError::Credential(
            "Your email account and/or password is/are missing.".into(),
        ));
    };

    // The username of Basic auth matches the mail column.
    let username = credentials.username.to_lowercase();
    debug!(username = %username, "login attempt");

    let user = User::find_activated_by_mail(db, &username)
        .await
        .map_err(|e| {
            ApiError::database("There are errors when find user in database.", e)
        })?;
    let Some(user) = user else {
        error!(username = %username, "user doesn't exist or is deactivated");
        return Err(ApiError::Credential(
            "User doesn't exist or is deactivated.".into(),
        ));
    };

    let password_matches = verify_password(&credentials.password, &user.password)
        .map_err(|e| ApiError::database("There are errors when verify the password.", e))?;
    if !password_matches {
        error!(username = %username, "login with wrong password");
        return Err(ApiError::Credential("Your password is incorrect.".into()));
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "token has been generated successfully");
    Ok(TokenResponse { token })
}
