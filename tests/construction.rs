use json_docstore::{DocumentStore, Error};
use serde_json::json;
use tempfile::TempDir;

fn store_path(dir: &TempDir, name: &str) -> std::path::PathBuf {
    dir.path().join(format!("{name}.json"))
}

// ---- argument checks --------------------------------------------------------

#[test]
fn empty_path_is_rejected() {
    let err = DocumentStore::open("").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

// ---- missing / empty files --------------------------------------------------

#[test]
fn missing_file_starts_empty_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "missing");

    let db = DocumentStore::open(&path).unwrap();
    assert!(db.is_empty());
    // no file until the first flush
    assert!(!path.exists());

    db.flush().unwrap();
    assert!(path.exists());
}

#[test]
fn empty_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "empty");
    std::fs::write(&path, b"").unwrap();

    let db = DocumentStore::open(&path).unwrap();
    assert!(db.is_empty());
}

// ---- corrupt files ----------------------------------------------------------

#[test]
fn non_json_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "corrupt");
    std::fs::write(&path, b"definitely {not} json").unwrap();

    let err = DocumentStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Corrupt { .. }));
}

#[test]
fn non_object_top_level_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "array");
    std::fs::write(&path, b"[1, 2, 3]").unwrap();

    let err = DocumentStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Corrupt { .. }));
}

// ---- reload -----------------------------------------------------------------

#[test]
fn persist_and_reload_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "roundtrip");
    {
        let db = DocumentStore::open(&path).unwrap();
        db.insert("user", json!({"firstname": "Ann", "lastname": "Lee"}))
            .unwrap();
        db.insert("count", 3).unwrap();
        db.insert("tags", json!(["a", "b"])).unwrap();
    }

    let db = DocumentStore::open(&path).unwrap();
    assert_eq!(
        db.get("user"),
        Some(json!({"firstname": "Ann", "lastname": "Lee"}))
    );
    assert_eq!(db.get("count"), Some(json!(3)));
    assert_eq!(db.get("tags"), Some(json!(["a", "b"])));
    assert_eq!(db.len(), 3);
}

#[test]
fn path_accessor() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "path_acc");
    let db = DocumentStore::open(&path).unwrap();
    assert_eq!(db.path(), path.as_path());
}

// ---- file format ------------------------------------------------------------

#[test]
fn flush_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "idempotent");
    let db = DocumentStore::builder(&path)
        .sync_on_write(false)
        .build()
        .unwrap();
    db.insert("a", 1).unwrap();
    db.insert("b", json!({"nested": true})).unwrap();

    db.flush().unwrap();
    let first = std::fs::read(&path).unwrap();
    db.flush().unwrap();
    let second = std::fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn pretty_output_uses_four_space_indent() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "pretty");
    let db = DocumentStore::open(&path).unwrap();
    db.insert("greeting", "hello").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n    \"greeting\""));
}

#[test]
fn compact_output_fits_on_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "compact");
    let db = DocumentStore::builder(&path).pretty(false).build().unwrap();
    db.insert("greeting", "hello").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'));
}

#[test]
fn file_preserves_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_path(&dir, "order");
    {
        let db = DocumentStore::open(&path).unwrap();
        db.insert("zebra", 1).unwrap();
        db.insert("apple", 2).unwrap();
        db.insert("mango", 3).unwrap();
    }

    let db = DocumentStore::open(&path).unwrap();
    assert_eq!(db.keys(), vec!["zebra", "apple", "mango"]);
}
