//! Authorization rules: pure functions of caller identity and target,
//! each denial surfacing as a Permission error.

use tracing::error;

use crate::error::ApiError;
use crate::users::repo::User;

/// Admin-only operations: create, full update, deactivate.
pub fn ensure_admin(caller: &User) -> Result<(), ApiError> {
    if caller.is_admin {
        return Ok(());
    }
    error!(caller_id = %caller.id, "non-admin caller denied");
    Err(ApiError::Permission(
        "Only admin can perform this operation.".into(),
    ))
}

/// Operations a user may perform on their own record: read, change password.
pub fn ensure_admin_or_self(caller: &User, target_id: &str) -> Result<(), ApiError> {
    if caller.is_admin || caller.id.to_string() == target_id {
        return Ok(());
    }
    error!(caller_id = %caller.id, target_id, "caller denied on foreign target");
    Err(ApiError::Permission(
        "It's not authorized to perform this operation.".into(),
    ))
}

/// Idempotence guard: deactivation is terminal and cannot be re-applied.
pub fn ensure_not_deactivated(target: &User) -> Result<(), ApiError> {
    if target.is_activated {
        return Ok(());
    }
    error!(target_id = %target.id, "target already deactivated");
    Err(ApiError::Permission(
        "This user has been deactivated already. You can not redeactivate him/her again.".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(is_admin: bool, is_activated: bool) -> User {
        User {
            id: Uuid::new_v4(),
            mail: "jane.doe@example.com".into(),
            password: "hash".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            is_admin,
            is_activated,
            liked_movie_id: None,
        }
    }

    #[test]
    fn admin_passes_all_checks() {
        let admin = user(true, true);
        let other = Uuid::new_v4().to_string();
        assert!(ensure_admin(&admin).is_ok());
        assert!(ensure_admin_or_self(&admin, &other).is_ok());
    }

    #[test]
    fn non_admin_is_denied_admin_only_operations() {
        let caller = user(false, true);
        let err = ensure_admin(&caller).unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_ERROR");
    }

    #[test]
    fn non_admin_may_act_on_self_only() {
        let caller = user(false, true);
        let own_id = caller.id.to_string();
        assert!(ensure_admin_or_self(&caller, &own_id).is_ok());

        let err = ensure_admin_or_self(&caller, &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_ERROR");
    }

    #[test]
    fn deactivation_guard_rejects_already_deactivated_target() {
        assert!(ensure_not_deactivated(&user(false, true)).is_ok());
        let err = ensure_not_deactivated(&user(false, false)).unwrap_err();
        assert_eq!(err.error_code(), "PERMISSION_ERROR");
    }
}
