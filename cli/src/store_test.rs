use std::path::PathBuf;

use super::*;

fn temp_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("eventboard-cli-test-{}-{tag}.json", std::process::id()))
}

#[test]
fn values_survive_a_reopen() {
    let path = temp_path("reopen");
    {
        let storage = FileStorage::open(path.clone());
        storage.set("token", "abc");
        storage.set("user", r#"{"id":1}"#);
    }

    let storage = FileStorage::open(path.clone());
    assert_eq!(storage.get("token"), Some("abc".to_owned()));
    assert_eq!(storage.get("user"), Some(r#"{"id":1}"#.to_owned()));

    let _ = std::fs::remove_file(path);
}

#[test]
fn remove_persists_too() {
    let path = temp_path("remove");
    {
        let storage = FileStorage::open(path.clone());
        storage.set("token", "abc");
        storage.remove("token");
    }

    let storage = FileStorage::open(path.clone());
    assert_eq!(storage.get("token"), None);

    let _ = std::fs::remove_file(path);
}

#[test]
fn unreadable_file_starts_empty() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "{not json").unwrap();

    let storage = FileStorage::open(path.clone());
    assert_eq!(storage.get("token"), None);

    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_file_starts_empty() {
    let storage = FileStorage::open(temp_path("missing-never-created"));
    assert_eq!(storage.get("token"), None);
}
