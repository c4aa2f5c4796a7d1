//! Core store type, options, and builder.

use crate::error::{Error, Result};
use crate::flush::AsyncFlushWorker;
use crate::persist::{atomic_write, load};
use crate::serializer::JsonCodec;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;

/// Write-durability knobs, merged with defaults via struct-update syntax:
///
/// ```rust
/// use json_docstore::StoreOptions;
///
/// let opts = StoreOptions { async_write: true, ..Default::default() };
/// assert!(opts.sync_on_write);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Hand disk writes to a background thread instead of blocking the
    /// caller. Failures then surface through
    /// [`DocumentStore::take_write_error`] instead of the mutating call.
    pub async_write: bool,
    /// Rewrite the backing file after every mutation. Disable to batch
    /// mutations and persist only on an explicit [`DocumentStore::flush`].
    pub sync_on_write: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            async_write: false,
            sync_on_write: true,
        }
    }
}

/// Single-file JSON document store.
///
/// Maps string keys to arbitrary JSON values, mirrored to one file on disk.
/// Use [`open`](Self::open) for the defaults (blocking writes, flush on every
/// mutation) or [`builder`](Self::builder) for full control.
///
/// The in-memory map is updated first and unconditionally; only the disk
/// mirror can lag or fail. Reads never touch the disk.
pub struct DocumentStore {
    storage: Arc<RwLock<Map<String, Value>>>,
    path: PathBuf,
    codec: JsonCodec,
    options: StoreOptions,
    trigger: Option<mpsc::Sender<()>>,
    write_error: Arc<Mutex<Option<Error>>>,
    worker: Option<AsyncFlushWorker>,
}

impl DocumentStore {
    /// Open (or lazily create) a store at `path` with default options.
    ///
    /// A missing file means an empty store; nothing is written to disk until
    /// the first flush. An existing file must be readable, writable, and
    /// (when non-empty) a valid JSON object.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Open with explicit options. Shorthand for
    /// `builder(path).options(opts).build()`.
    pub fn open_with_options(path: impl AsRef<Path>, options: StoreOptions) -> Result<Self> {
        Self::builder(path).options(options).build()
    }

    /// Start configuring a new store. Call
    /// [`.build()`](DocumentStoreBuilder::build) when ready.
    pub fn builder(path: impl AsRef<Path>) -> DocumentStoreBuilder {
        DocumentStoreBuilder::new(path)
    }

    // ---- reads ----

    /// Get the value for `key`, or `None` if absent. Never an error.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.storage.read().get(key).cloned()
    }

    /// `true` if the key exists. Avoids cloning the value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.read().contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.read().len()
    }

    /// `true` when the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.read().is_empty()
    }

    /// All keys, in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.storage.read().keys().cloned().collect()
    }

    /// Deep copy of the whole map. Mutating the copy does not affect the
    /// store.
    #[must_use]
    pub fn snapshot(&self) -> Map<String, Value> {
        self.storage.read().clone()
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The options this store was opened with.
    #[must_use]
    pub fn options(&self) -> StoreOptions {
        self.options
    }

    // ---- writes ----

    /// Insert or overwrite `key`, returning the previous value if the key
    /// existed. The value is converted through [`serde_json::to_value`];
    /// anything that does not serialize to JSON is rejected with
    /// [`Error::InvalidArgument`], as is an empty key.
    pub fn insert(&self, key: impl Into<String>, value: impl Serialize) -> Result<Option<Value>> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::invalid("key must be a non-empty string"));
        }
        let value = serde_json::to_value(value)
            .map_err(|e| Error::invalid(format!("value does not serialize to JSON: {e}")))?;

        let prev = self.storage.write().insert(key, value);
        self.on_mutation()?;
        Ok(prev)
    }

    /// Remove `key`, returning its value if it was present. Removing an
    /// absent key changes nothing and triggers no flush.
    pub fn remove(&self, key: &str) -> Result<Option<Value>> {
        let prev = self.storage.write().shift_remove(key);
        if prev.is_some() {
            self.on_mutation()?;
        }
        Ok(prev)
    }

    /// Drop every entry, then persist once (not once per key) when
    /// `sync_on_write` is enabled.
    pub fn clear(&self) -> Result<()> {
        self.storage.write().clear();
        self.on_mutation()
    }

    /// Replace the whole map. The value must serialize to a JSON object;
    /// anything else is rejected with [`Error::InvalidArgument`] and the
    /// store is left untouched. Returns a deep copy of the new contents.
    ///
    /// Unlike [`insert`](Self::insert) and [`remove`](Self::remove) this does
    /// not auto-flush; call [`flush`](Self::flush) to persist the swap.
    pub fn replace(&self, value: impl Serialize) -> Result<Map<String, Value>> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::invalid(format!("value does not serialize to JSON: {e}")))?;
        let map = match value {
            Value::Object(map) => map,
            _ => return Err(Error::invalid("replacement value must be a JSON object")),
        };

        let copy = map.clone();
        *self.storage.write() = map;
        Ok(copy)
    }

    // ---- persistence ----

    /// Write the current full snapshot to disk (temp file + rename).
    ///
    /// With `async_write` enabled this only enqueues the write and returns;
    /// failures then surface through [`take_write_error`](Self::take_write_error).
    pub fn flush(&self) -> Result<()> {
        match &self.trigger {
            Some(tx) => {
                let _ = tx.send(());
                Ok(())
            }
            None => do_flush(&self.storage, &self.path, &self.codec),
        }
    }

    /// Most recent background write failure, if any. Only relevant with
    /// `async_write`; each failure is also logged as it happens.
    pub fn take_write_error(&self) -> Option<Error> {
        self.write_error.lock().take()
    }

    // ---- internal ----

    fn on_mutation(&self) -> Result<()> {
        if self.options.sync_on_write {
            self.flush()
        } else {
            Ok(())
        }
    }
}

impl Drop for DocumentStore {
    fn drop(&mut self) {
        // Disconnect the queue so the worker drains pending writes and
        // exits; AsyncFlushWorker::drop then joins it.
        self.trigger.take();
        self.worker.take();
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

fn do_flush(
    storage: &RwLock<Map<String, Value>>,
    path: &Path,
    codec: &JsonCodec,
) -> Result<()> {
    let snapshot = storage.read().clone();
    let bytes = codec
        .encode(&snapshot)
        .map_err(|e| Error::invalid(format!("storage does not serialize to JSON: {e}")))?;
    atomic_write(path, &bytes)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`DocumentStore`].
///
/// ```rust,no_run
/// use json_docstore::DocumentStore;
///
/// let db = DocumentStore::builder("db.json")
///     .sync_on_write(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct DocumentStoreBuilder {
    path: PathBuf,
    options: StoreOptions,
    pretty: bool,
}

impl DocumentStoreBuilder {
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            options: StoreOptions::default(),
            pretty: true,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// Hand disk writes to a background thread (default: blocking writes).
    pub fn async_write(mut self, yes: bool) -> Self {
        self.options.async_write = yes;
        self
    }

    /// Rewrite the file after every mutation (default: enabled).
    pub fn sync_on_write(mut self, yes: bool) -> Self {
        self.options.sync_on_write = yes;
        self
    }

    /// Human-readable JSON with 4-space indentation (default: enabled).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load (or lazily create) the store.
    pub fn build(self) -> Result<DocumentStore> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::invalid("missing file path"));
        }

        let codec = if self.pretty {
            JsonCodec::pretty()
        } else {
            JsonCodec::compact()
        };

        let storage = Arc::new(RwLock::new(load(&self.path, &codec)?));
        let write_error: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));

        let (trigger, worker) = if self.options.async_write {
            let (tx, rx) = mpsc::channel();
            let storage_ref = Arc::clone(&storage);
            let error_slot = Arc::clone(&write_error);
            let codec_ref = codec.clone();
            let path = self.path.clone();
            let worker = AsyncFlushWorker::start(
                move || {
                    if let Err(e) = do_flush(&storage_ref, &path, &codec_ref) {
                        log::warn!("background write to {} failed: {e}", path.display());
                        *error_slot.lock() = Some(e);
                    }
                },
                rx,
            );
            (Some(tx), Some(worker))
        } else {
            (None, None)
        };

        Ok(DocumentStore {
            storage,
            path: self.path,
            codec,
            options: self.options,
            trigger,
            write_error,
            worker,
        })
    }
}
