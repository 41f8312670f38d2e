//! Email/password identity provider backed by the `accounts` collection
//!
//! The account document id is the identity uid. Password hashes never leave
//! this module.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use shared::message::Collection;

use super::password::{hash_password, verify_dummy, verify_password};
use crate::store::{DocumentStore, Query};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    #[serde(default, skip_serializing)]
    id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    fn user_info(&self) -> UserInfo {
        UserInfo {
            uid: self.id.clone(),
            email: self.email.clone(),
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn find_by_email(store: &DocumentStore, email: &str) -> AppResult<Option<Account>> {
    let mut found: Vec<Account> =
        store.query_as(Collection::Accounts, &Query::new().eq("email", normalize_email(email)))?;
    Ok(found.pop())
}

/// Serializes the email check with the insert that follows it
static CREATE_LOCK: Mutex<()> = Mutex::new(());

/// Create an identity, failing with 409 when the email is taken
pub fn create_account(store: &DocumentStore, email: &str, password: &str) -> AppResult<UserInfo> {
    let password_hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let account = Account {
        id: String::new(),
        email: normalize_email(email),
        password_hash,
        created_at: shared::util::now(),
    };

    let _guard = CREATE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if find_by_email(store, &account.email)?.is_some() {
        return Err(AppError::with_message(
            ErrorCode::AlreadyExists,
            "An account with this email already exists",
        ));
    }
    let doc = store.insert(Collection::Accounts, &account)?;
    let uid = doc["id"].as_str().unwrap_or_default().to_string();

    Ok(UserInfo {
        uid,
        email: account.email,
    })
}

/// Create an identity and run `setup` on it; the account is removed again
/// if `setup` fails
pub fn provision_account<F>(
    store: &DocumentStore,
    email: &str,
    password: &str,
    setup: F,
) -> AppResult<UserInfo>
where
    F: FnOnce(&UserInfo) -> AppResult<()>,
{
    let user = create_account(store, email, password)?;
    if let Err(e) = setup(&user) {
        match store.delete(Collection::Accounts, &user.uid) {
            Ok(_) => tracing::warn!(uid = %user.uid, error = %e, "Account setup failed, rolled back"),
            Err(del) => tracing::error!(
                uid = %user.uid,
                error = %e,
                rollback_error = %del,
                "Account setup failed and rollback failed"
            ),
        }
        return Err(e);
    }
    Ok(user)
}

/// Verify credentials
///
/// Unknown email and wrong password both yield `None`.
pub fn authenticate(store: &DocumentStore, email: &str, password: &str) -> AppResult<Option<UserInfo>> {
    let Some(account) = find_by_email(store, email)? else {
        verify_dummy(password);
        return Ok(None);
    };
    Ok(verify_password(password, &account.password_hash).then(|| account.user_info()))
}

pub fn exists(store: &DocumentStore, email: &str) -> AppResult<bool> {
    Ok(find_by_email(store, email)?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChangeBus;

    fn store() -> DocumentStore {
        DocumentStore::open_in_memory(ChangeBus::new()).unwrap()
    }

    #[test]
    fn test_create_then_authenticate() {
        let store = store();
        let user = create_account(&store, " Admin@Tiffin.test ", "password123").unwrap();
        assert_eq!(user.email, "admin@tiffin.test");

        let ok = authenticate(&store, "admin@tiffin.test", "password123").unwrap();
        assert_eq!(ok, Some(user));
        assert_eq!(authenticate(&store, "admin@tiffin.test", "nope").unwrap(), None);
        assert_eq!(authenticate(&store, "ghost@tiffin.test", "password123").unwrap(), None);
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let store = store();
        create_account(&store, "chef@tiffin.test", "password123").unwrap();
        let err = create_account(&store, "CHEF@tiffin.test", "password456").unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[test]
    fn test_unknown_email_still_fails_after_verifying() {
        let store = store();
        create_account(&store, "chef@tiffin.test", "password123").unwrap();
        assert_eq!(authenticate(&store, "ghost@tiffin.test", "password123").unwrap(), None);
        assert_eq!(authenticate(&store, "", "").unwrap(), None);
    }

    #[test]
    fn test_concurrent_creates_with_same_email_yield_one_account() {
        let store = store();
        let results: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| create_account(&store, "race@tiffin.test", "password123")))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let found: Vec<Account> = store
            .query_as(Collection::Accounts, &Query::new().eq("email", "race@tiffin.test"))
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_failed_setup_removes_the_account() {
        let store = store();
        let err = provision_account(&store, "cook@tiffin.test", "password123", |_| {
            Err(AppError::new(ErrorCode::RoleLookupFailed))
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleLookupFailed);
        assert!(!exists(&store, "cook@tiffin.test").unwrap());

        // the email is free again
        let user = provision_account(&store, "cook@tiffin.test", "password123", |_| Ok(())).unwrap();
        assert!(store.get(Collection::Accounts, &user.uid).unwrap().is_some());
    }

    #[test]
    fn test_hash_is_not_exposed_in_stored_id_field() {
        let store = store();
        let user = create_account(&store, "a@tiffin.test", "password123").unwrap();
        let doc = store.get(Collection::Accounts, &user.uid).unwrap().unwrap();
        assert_eq!(doc["id"], user.uid.as_str());
        assert!(doc["password_hash"].as_str().unwrap().starts_with("$argon2"));
    }
}
