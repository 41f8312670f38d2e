//! Document storage
//!
//! JSON documents in named collections on top of redb, with filtered
//! queries and live [`Watch`] handles fed by the change bus.

mod document;
mod error;
pub mod query;
mod watch;

pub use document::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use query::{Direction, Filter, Query};
pub use watch::Watch;
