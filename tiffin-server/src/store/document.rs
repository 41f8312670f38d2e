//! redb-backed JSON document store
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `documents` | `(collection, id)` | JSON object bytes |
//!
//! Every write commits its own transaction and then publishes one
//! [`ChangeEvent`] on the [`ChangeBus`]. Writers are serialised by redb, so
//! concurrent updates to one document resolve as last write wins.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::message::{ChangeEvent, ChangeKind, Collection};

use super::error::{StoreError, StoreResult};
use super::query::{Direction, Query};
use super::watch::Watch;
use crate::message::ChangeBus;

/// key = (collection, id), value = JSON-serialized document
const DOCUMENTS_TABLE: TableDefinition<(&str, &str), &[u8]> = TableDefinition::new("documents");

/// Document store shared by every handler
#[derive(Clone)]
pub struct DocumentStore {
    db: Arc<Database>,
    bus: ChangeBus,
}

impl DocumentStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>, bus: ChangeBus) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db, bus)
    }

    /// In-memory database, used by tests and throwaway instances
    pub fn open_in_memory(bus: ChangeBus) -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, bus)
    }

    fn init(db: Database, bus: ChangeBus) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self {
            db: Arc::new(db),
            bus,
        })
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Store a new document under a fresh id and return it
    pub fn insert<T: Serialize>(&self, collection: Collection, body: &T) -> StoreResult<Value> {
        let id = shared::util::new_id();
        let doc = self.write_document(collection, &id, body)?;
        self.bus
            .publish(ChangeEvent::new(collection, id, ChangeKind::Created));
        Ok(doc)
    }

    /// Create or replace the document with a known id
    pub fn put<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> StoreResult<Value> {
        let existed = self.get(collection, id)?.is_some();
        let doc = self.write_document(collection, id, body)?;
        let kind = if existed {
            ChangeKind::Updated
        } else {
            ChangeKind::Created
        };
        self.bus.publish(ChangeEvent::new(collection, id, kind));
        Ok(doc)
    }

    fn write_document<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        body: &T,
    ) -> StoreResult<Value> {
        let Value::Object(mut fields) = serde_json::to_value(body)? else {
            return Err(StoreError::NotAnObject(collection));
        };
        fields.insert("id".to_string(), Value::String(id.to_string()));
        let doc = Value::Object(fields);
        let bytes = serde_json::to_vec(&doc)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.insert((collection.as_str(), id), bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(doc)
    }

    pub fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Value>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;
        match table.get((collection.as_str(), id))? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_as<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> StoreResult<Option<T>> {
        self.get(collection, id)?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// All documents of a collection, oldest `created_at` first
    ///
    /// Documents without `created_at` keep key order.
    pub fn list(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        self.query(
            collection,
            &Query::new().order_by("created_at", Direction::Asc),
        )
    }

    pub fn query(&self, collection: Collection, query: &Query) -> StoreResult<Vec<Value>> {
        Ok(query.apply(self.scan(collection)?))
    }

    pub fn query_as<T: DeserializeOwned>(
        &self,
        collection: Collection,
        query: &Query,
    ) -> StoreResult<Vec<T>> {
        self.query(collection, query)?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }

    fn scan(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let name = collection.as_str();
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;

        let mut docs = Vec::new();
        for entry in table.range((name, "")..)? {
            let (key, value) = entry?;
            if key.value().0 != name {
                break;
            }
            docs.push(serde_json::from_slice(value.value())?);
        }
        Ok(docs)
    }

    /// Merge top-level fields into an existing document
    ///
    /// `id` in the patch is ignored. Fails with `NotFound` when the document
    /// does not exist; nothing is created.
    pub fn update_fields(
        &self,
        collection: Collection,
        id: &str,
        patch: Map<String, Value>,
    ) -> StoreResult<Value> {
        let write_txn = self.db.begin_write()?;
        let doc = {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            let existing = table
                .get((collection.as_str(), id))?
                .map(|value| value.value().to_vec());
            let Some(bytes) = existing else {
                return Err(StoreError::NotFound {
                    collection,
                    id: id.to_string(),
                });
            };

            let mut doc: Value = serde_json::from_slice(&bytes)?;
            let Some(fields) = doc.as_object_mut() else {
                return Err(StoreError::NotAnObject(collection));
            };
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
            let bytes = serde_json::to_vec(&doc)?;
            table.insert((collection.as_str(), id), bytes.as_slice())?;
            doc
        };
        write_txn.commit()?;

        self.bus
            .publish(ChangeEvent::new(collection, id, ChangeKind::Updated));
        Ok(doc)
    }

    /// Remove a document, returning whether it existed
    pub fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.remove((collection.as_str(), id))?.is_some()
        };
        write_txn.commit()?;

        if removed {
            self.bus
                .publish(ChangeEvent::new(collection, id, ChangeKind::Deleted));
        }
        Ok(removed)
    }

    /// Live query over one collection
    pub fn watch(&self, collection: Collection, query: Query) -> Watch {
        Watch::new(self.clone(), collection, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> DocumentStore {
        DocumentStore::open_in_memory(ChangeBus::new()).unwrap()
    }

    #[test]
    fn test_insert_assigns_id_and_get_returns_it() {
        let store = store();
        let doc = store
            .insert(Collection::MenuItems, &json!({"name": "Idli Sambar", "price": 120}))
            .unwrap();
        let id = doc["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let loaded = store.get(Collection::MenuItems, id).unwrap().unwrap();
        assert_eq!(loaded["name"], "Idli Sambar");
        assert!(store.get(Collection::Gallery, id).unwrap().is_none());
    }

    #[test]
    fn test_insert_rejects_non_objects() {
        let err = store().insert(Collection::Contacts, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(Collection::Contacts)));
    }

    #[test]
    fn test_collections_are_isolated() {
        let store = store();
        store.insert(Collection::Contacts, &json!({"name": "a"})).unwrap();
        store.insert(Collection::Feedback, &json!({"name": "b"})).unwrap();
        store.insert(Collection::Feedback, &json!({"name": "c"})).unwrap();

        assert_eq!(store.list(Collection::Contacts).unwrap().len(), 1);
        assert_eq!(store.list(Collection::Feedback).unwrap().len(), 2);
        assert!(store.list(Collection::Gallery).unwrap().is_empty());
    }

    #[test]
    fn test_list_orders_by_created_at() {
        let store = store();
        store
            .insert(Collection::Reservations, &json!({"name": "second", "created_at": "2026-03-02T10:00:00Z"}))
            .unwrap();
        store
            .insert(Collection::Reservations, &json!({"name": "first", "created_at": "2026-03-01T10:00:00Z"}))
            .unwrap();

        let names: Vec<_> = store
            .list(Collection::Reservations)
            .unwrap()
            .into_iter()
            .map(|d| d["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_update_fields_merges_and_publishes() {
        let store = store();
        let mut rx = store.bus().subscribe();
        let doc = store
            .insert(Collection::Preorders, &json!({"status": "pending", "total_amount": 390}))
            .unwrap();
        let id = doc["id"].as_str().unwrap().to_string();
        assert_eq!(rx.try_recv().unwrap().kind, ChangeKind::Created);

        let mut patch = Map::new();
        patch.insert("status".into(), json!("approved"));
        patch.insert("id".into(), json!("hijack"));
        let updated = store
            .update_fields(Collection::Preorders, &id, patch)
            .unwrap();
        assert_eq!(updated["status"], "approved");
        assert_eq!(updated["total_amount"], 390);
        assert_eq!(updated["id"], id.as_str());

        let event = rx.try_recv().unwrap();
        assert_eq!(event, ChangeEvent::new(Collection::Preorders, id, ChangeKind::Updated));
    }

    #[test]
    fn test_update_missing_document_fails_without_event() {
        let store = store();
        let mut rx = store.bus().subscribe();
        let err = store
            .update_fields(Collection::Preorders, "nope", Map::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(rx.try_recv().is_err());
        assert!(store.get(Collection::Preorders, "nope").unwrap().is_none());
    }

    #[test]
    fn test_put_upserts_with_known_id() {
        let store = store();
        store.put(Collection::UserRoles, "uid-1", &json!({"role": "chef"})).unwrap();
        store.put(Collection::UserRoles, "uid-1", &json!({"role": "admin"})).unwrap();
        let doc = store.get(Collection::UserRoles, "uid-1").unwrap().unwrap();
        assert_eq!(doc, json!({"id": "uid-1", "role": "admin"}));
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = store();
        let doc = store.insert(Collection::Gallery, &json!({"title": "Dosa"})).unwrap();
        let id = doc["id"].as_str().unwrap();
        assert!(store.delete(Collection::Gallery, id).unwrap());
        assert!(!store.delete(Collection::Gallery, id).unwrap());
    }

    #[test]
    fn test_query_filters_on_nested_field() {
        let store = store();
        for phone in ["111", "222", "111"] {
            store
                .insert(Collection::Preorders, &json!({"customer_info": {"phone": phone}}))
                .unwrap();
        }
        let hits = store
            .query(Collection::Preorders, &Query::new().eq("customer_info.phone", "111"))
            .unwrap();
        assert_eq!(hits.len(), 2);
    }
}
