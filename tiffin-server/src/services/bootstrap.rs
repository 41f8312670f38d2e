//! 启动时创建首个管理员
//!
//! 只在账号不存在时创建。已存在的账号不修改密码，但缺少角色时补上 admin。

use shared::models::{Role, RoleLookup};

use crate::auth::{accounts, assign_role, lookup_role};
use crate::core::BootstrapAdmin;
use crate::store::DocumentStore;
use crate::utils::AppResult;
use crate::{audit_log, security_log};

pub fn ensure_bootstrap_admin(store: &DocumentStore, admin: &BootstrapAdmin) -> AppResult<()> {
    let email = accounts::normalize_email(&admin.email);

    let uid = match accounts::authenticate(store, &email, &admin.password)? {
        Some(user) => user.uid,
        None if accounts::exists(store, &email)? => {
            security_log!(WARN, "bootstrap_admin_mismatch", email = %email);
            tracing::warn!(email = %email, "Bootstrap admin exists with a different password, leaving it untouched");
            return Ok(());
        }
        None => {
            let user = accounts::create_account(store, &email, &admin.password)?;
            tracing::info!(email = %email, uid = %user.uid, "Bootstrap admin account created");
            user.uid
        }
    };

    if lookup_role(store, &uid) == RoleLookup::NotFound {
        assign_role(store, &uid, Role::Admin)?;
        audit_log!("system", "assign_role", format!("user_role:{uid}"), "admin (bootstrap)");
    }
    Ok(())
}
