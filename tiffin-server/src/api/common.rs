//! Helpers shared by the handlers

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::message::Collection;

use crate::store::DocumentStore;
use crate::utils::{AppError, AppResult};

/// A create payload plus its server timestamp
#[derive(Serialize)]
pub struct Stamped<'a, T> {
    #[serde(flatten)]
    pub body: &'a T,
    pub created_at: DateTime<Utc>,
}

/// Insert `body` with `created_at` and read it back as `R`
pub fn insert_stamped<T, R>(store: &DocumentStore, collection: Collection, body: &T) -> AppResult<R>
where
    T: Serialize,
    R: DeserializeOwned,
{
    let doc = store.insert(
        collection,
        &Stamped {
            body,
            created_at: shared::util::now(),
        },
    )?;
    parse(collection, doc)
}

pub fn parse<R: DeserializeOwned>(collection: Collection, doc: Value) -> AppResult<R> {
    serde_json::from_value(doc)
        .map_err(|e| AppError::database(format!("Malformed {collection} document: {e}")))
}
