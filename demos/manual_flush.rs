use json_docstore::DocumentStore;
use serde_json::json;

fn main() -> Result<(), json_docstore::Error> {
    env_logger::init();

    let path = std::env::temp_dir().join("json_docstore_demo_manual.json");

    // batch mutations in memory, persist once
    let db = DocumentStore::builder(&path).sync_on_write(false).build()?;

    db.insert("name", "json-docstore")?;
    db.insert("version", "0.1.0")?;
    db.insert("features", json!(["sync", "async", "manual"]))?;
    println!("nothing on disk yet: {}", !db.path().exists());

    db.flush()?;

    // the file is pretty-printed with 4-space indentation
    let contents = std::fs::read_to_string(db.path()).expect("backing file is readable");
    println!("On-disk JSON:\n{contents}");

    println!("\nDebug output: {db:?}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
