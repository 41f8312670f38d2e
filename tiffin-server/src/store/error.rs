use shared::error::{AppError, ErrorCode};
use shared::message::Collection;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document in {0} must be a JSON object")]
    NotAnObject(Collection),

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: Collection, id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => {
                AppError::with_message(ErrorCode::NotFound, format!("{collection} {id} not found"))
                    .with_detail("collection", collection.as_str())
                    .with_detail("id", id)
            }
            StoreError::NotAnObject(collection) => AppError::validation(format!(
                "Document in {collection} must be a JSON object"
            )),
            other => AppError::database(other.to_string()),
        }
    }
}
