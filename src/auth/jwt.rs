use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::dto::{Claims, JwtKeys};
use crate::error::ApiError;
use crate::state::AppState;

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let auth = &state.config.auth;
        JwtKeys::new(&auth.secret_key, auth.token_ttl_minutes)
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }

    /// Issues a token carrying the user's id, expiring `token_ttl` from now
    /// (30 minutes by default).
    pub fn sign(&self, user_id: Uuid) -> Result<String, ApiError> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(self.token_ttl.as_secs() as i64);
        let claims = Claims {
            id: user_id,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            error!(error = %e, "failed to sign token");
            ApiError::database("There are errors when generate the token.", e)
        })?;
        debug!(user_id = %user_id, "token signed");
        Ok(token)
    }

    /// Verifies signature and expiry. An expired token and a token signed
    /// with another secret are distinct credential failures.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.id, "token verified");
                Ok(data.claims)
            }
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => {
                error!("This token is expired.");
                Err(ApiError::Credential("This token is expired.".into()))
            }
            Err(e) => {
                error!(error = %e, "This token is wrong.");
                Err(ApiError::Credential("This token is wrong.".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Header};

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, 30)
    }

    #[test]
    fn sign_and_verify_roundtrip_with_thirty_minute_expiry() {
        let keys = make_keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign token");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.id, user_id);

        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let delta = claims.exp as i64 - now as i64;
        // 30 minutes, with a little slack for test runtime
        assert!((1795..=1805).contains(&delta), "expiry delta was {delta}");
    }

    #[test]
    fn verify_rejects_wrong_secret_as_wrong_token() {
        let token = make_keys("secret-a").sign(Uuid::new_v4()).expect("sign");
        let err = make_keys("secret-b").verify(&token).unwrap_err();
        assert_eq!(err.to_string(), "This token is wrong.");
        assert_eq!(err.error_code(), "CREDENTIAL_ERROR");
    }

    #[test]
    fn verify_rejects_expired_token_as_expired() {
        let keys = make_keys("dev-secret");
        let exp = OffsetDateTime::now_utc() - TimeDuration::minutes(5);
        let claims = Claims {
            id: Uuid::new_v4(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        let err = keys.verify(&token).unwrap_err();
        assert_eq!(err.to_string(), "This token is expired.");
        assert_eq!(err.error_code(), "CREDENTIAL_ERROR");
    }

    #[test]
    fn verify_rejects_garbage() {
        let err = make_keys("dev-secret").verify("not.a.jwt").unwrap_err();
        assert_eq!(err.to_string(), "This token is wrong.");
    }
}
