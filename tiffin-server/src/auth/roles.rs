//! Role lookup and role checks
//!
//! Roles live in `user_roles/{uid}` as `{role}`. A missing document means no
//! role; nothing is ever assumed.

use shared::message::Collection;
use shared::models::{Role, RoleLookup, UserRole};
use shared::route::{Access, LoginReason, gate};

use super::CurrentUser;
use crate::security_log;
use crate::store::{DocumentStore, StoreResult};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Fresh role lookup for an identity
///
/// Store failures and malformed role documents become `LookupError`.
pub fn lookup_role(store: &DocumentStore, uid: &str) -> RoleLookup {
    match store.get_as::<UserRole>(Collection::UserRoles, uid) {
        Ok(Some(doc)) => RoleLookup::Found { role: doc.role },
        Ok(None) => RoleLookup::NotFound,
        Err(e) => {
            tracing::error!(uid = %uid, error = %e, "Role lookup failed");
            RoleLookup::LookupError {
                message: e.to_string(),
            }
        }
    }
}

pub fn assign_role(store: &DocumentStore, uid: &str, role: Role) -> StoreResult<()> {
    store.put(Collection::UserRoles, uid, &UserRole { role })?;
    Ok(())
}

fn denied_code(allowed: &[Role]) -> ErrorCode {
    match allowed {
        [Role::Admin] => ErrorCode::AdminRequired,
        [Role::Chef] => ErrorCode::ChefRequired,
        _ => ErrorCode::RoleRequired,
    }
}

/// Server side twin of the client route gate
///
/// | Outcome | Error |
/// |---------|-------|
/// | no identity | 401 |
/// | no role / role not allowed | 403 |
/// | lookup failed | 500 |
pub fn authorize(
    user: Option<&CurrentUser>,
    lookup: Option<&RoleLookup>,
    allowed: &[Role],
) -> AppResult<Role> {
    let Some(user) = user else {
        return Err(AppError::unauthorized());
    };
    let Some(lookup) = lookup else {
        return Err(AppError::new(ErrorCode::RoleLookupFailed));
    };

    match gate(true, lookup, allowed) {
        Access::Granted => lookup
            .role()
            .ok_or_else(|| AppError::new(ErrorCode::RoleLookupFailed)),
        Access::Login(LoginReason::NoIdentity) => Err(AppError::unauthorized()),
        Access::Login(LoginReason::NoRole) => {
            security_log!(WARN, "role_missing", uid = %user.uid, email = %user.email);
            Err(AppError::new(ErrorCode::RoleRequired))
        }
        Access::Login(LoginReason::RoleNotAllowed) => {
            security_log!(
                WARN,
                "role_denied",
                uid = %user.uid,
                role = ?lookup.role(),
                required = ?allowed
            );
            Err(AppError::new(denied_code(allowed)))
        }
        Access::Login(LoginReason::LookupFailed) => {
            Err(AppError::new(ErrorCode::RoleLookupFailed))
        }
    }
}
