use json_docstore::DocumentStore;
use serde_json::json;

fn main() -> Result<(), json_docstore::Error> {
    env_logger::init();

    let path = std::env::temp_dir().join("json_docstore_demo_basic.json");
    let db = DocumentStore::open(&path)?;

    // insert / get / remove; every mutation is persisted immediately
    db.insert("user", json!({"firstname": "Ann", "lastname": "Lee"}))?;
    db.insert("visits", 3)?;
    println!("user   = {:?}", db.get("user"));
    println!("visits = {:?}", db.get("visits"));

    println!("has user?   {}", db.contains_key("user"));
    println!("removed: {:?}", db.remove("visits")?);

    // whole-map operations
    println!("keys     = {:?}", db.keys());
    println!("snapshot = {:?}", db.snapshot());
    println!("len = {}, empty? {}", db.len(), db.is_empty());

    db.clear()?;
    println!("after clear: len = {}", db.len());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
