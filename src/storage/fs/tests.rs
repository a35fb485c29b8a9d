use super::*;
use crate::storage::Submitter;
use tempfile::TempDir;

fn create_test_store() -> (FsDocumentStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FsDocumentStore::new(dir.path().join("docs"));
    (store, dir)
}

fn create_test_document(name: &str, body: &str) -> NewDocument {
    NewDocument::new(name, "text/plain", body.as_bytes()).with_submitter(Submitter {
        team_name: "Team Alpha".to_string(),
        team_leader: "Sam".to_string(),
        team_email: "alpha@example.com".to_string(),
    })
}

#[tokio::test]
async fn test_put_and_fetch() {
    let (store, _dir) = create_test_store();

    let meta = store
        .put(create_test_document("paper.txt", "abstract: hello"))
        .await
        .expect("Failed to store");

    assert_eq!(meta.filename, "paper.txt");
    assert_eq!(meta.length, 15);
    assert_eq!(meta.submitter.team_name, "Team Alpha");

    let bytes = store.fetch(&meta.id).await.expect("Failed to fetch");
    assert_eq!(bytes, b"abstract: hello");
}

#[tokio::test]
async fn test_metadata_roundtrips_through_sidecar() {
    let (store, _dir) = create_test_store();

    let meta = store
        .put(create_test_document("paper.txt", "body"))
        .await
        .unwrap();

    let loaded = store.metadata(&meta.id).await.unwrap();
    assert_eq!(loaded, meta);
}

#[tokio::test]
async fn test_put_creates_storage_dir() {
    let (store, _dir) = create_test_store();
    assert!(!store.storage_path().exists());

    store.put(create_test_document("a.txt", "x")).await.unwrap();

    assert!(store.storage_path().is_dir());
}

#[tokio::test]
async fn test_no_temp_files_left_behind() {
    let (store, _dir) = create_test_store();
    store.put(create_test_document("a.txt", "x")).await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(store.storage_path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_fetch_missing_is_not_found() {
    let (store, _dir) = create_test_store();

    let err = store.fetch(&DocumentId::new()).await.unwrap_err();
    assert!(err.is_not_found());

    let err = store.metadata(&DocumentId::new()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete() {
    let (store, _dir) = create_test_store();
    let meta = store.put(create_test_document("a.txt", "x")).await.unwrap();

    store.delete(&meta.id).await.expect("Failed to delete");

    assert!(store.fetch(&meta.id).await.unwrap_err().is_not_found());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (store, _dir) = create_test_store();
    store.ensure_storage_path().await.unwrap();

    let err = store.delete(&DocumentId::new()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_empty_when_root_missing() {
    let (store, _dir) = create_test_store();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_in_upload_order() {
    let (store, _dir) = create_test_store();

    let mut ids = Vec::new();
    for name in ["first.txt", "second.txt", "third.txt"] {
        let meta = store.put(create_test_document(name, name)).await.unwrap();
        ids.push(meta.id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let listed: Vec<_> = store.list().await.unwrap().into_iter().map(|m| m.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_ignores_foreign_files() {
    let (store, _dir) = create_test_store();
    store.put(create_test_document("a.txt", "x")).await.unwrap();

    std::fs::write(store.storage_path().join("notes.json"), b"{}").unwrap();
    std::fs::write(store.storage_path().join("readme.md"), b"hi").unwrap();

    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_eligible_filters_content_type() {
    let (store, _dir) = create_test_store();
    store.put(create_test_document("a.txt", "x")).await.unwrap();
    store
        .put(NewDocument::new("b.png", "image/png", vec![0u8, 1, 2]))
        .await
        .unwrap();

    let eligible = store.list_eligible("text/plain").await.unwrap();
    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].filename, "a.txt");

    let all = store.list().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_content_hash_is_stable() {
    let (store, _dir) = create_test_store();
    let a = store.put(create_test_document("a.txt", "same")).await.unwrap();
    let b = store.put(create_test_document("b.txt", "same")).await.unwrap();
    let c = store.put(create_test_document("c.txt", "different")).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.content_hash, b.content_hash);
    assert_ne!(a.content_hash, c.content_hash);
    assert_eq!(a.content_hash.len(), 64);
}

#[tokio::test]
async fn test_list_skips_corrupt_sidecar() {
    let (store, _dir) = create_test_store();

    let good = store.put(create_test_document("good.txt", "intact")).await.unwrap();
    let bad = store.put(create_test_document("bad.txt", "damaged")).await.unwrap();
    std::fs::write(store.meta_path(&bad.id), b"{ not json").unwrap();

    let listed = store.list().await.expect("listing should survive a corrupt sidecar");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, good.id);

    assert!(matches!(
        store.metadata(&bad.id).await,
        Err(StoreError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_list_skips_unreadable_sidecar_entry() {
    let (store, _dir) = create_test_store();

    let good = store.put(create_test_document("good.txt", "intact")).await.unwrap();
    let odd = DocumentId::new();
    // A directory named like a sidecar cannot be read as a file.
    std::fs::create_dir(store.meta_path(&odd)).unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, good.id);
}
