//! Single-file JSON document store with configurable write durability.
//!
//! Keys are strings, values are arbitrary JSON. The whole map lives in
//! memory and is mirrored to one pretty-printed JSON file on disk. By
//! default every mutation rewrites the file synchronously; both knobs are
//! [`StoreOptions`]: `sync_on_write` (auto-flush on mutation) and
//! `async_write` (background writes).
//!
//! ```rust,no_run
//! use json_docstore::DocumentStore;
//! use serde_json::json;
//!
//! let db = DocumentStore::open("db.json").unwrap();
//! db.insert("user", json!({"firstname": "Ann", "lastname": "Lee"})).unwrap();
//! assert!(db.contains_key("user"));
//! ```
//!
//! **Single-process only.** If multiple processes open the same file they
//! will clobber each other. Use advisory file locking or a real database for
//! multi-process access.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod flush;
pub mod persist;
pub mod serializer;
pub mod store;

pub use error::{Error, Result};
pub use store::{DocumentStore, DocumentStoreBuilder, StoreOptions};
