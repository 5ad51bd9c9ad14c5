//! Behaviour shared by both store backends

use blockpress_store::{DefaultPage, JsonFileStore, MemoryStore, PageStatus, PageStore, StoreError};

async fn assert_idempotent_seeding(store: &dyn PageStore) {
    store.ensure_default_pages().await.unwrap();
    let once = store.list_pages().await.unwrap();

    store.ensure_default_pages().await.unwrap();
    let twice = store.list_pages().await.unwrap();

    assert_eq!(once, twice);
    assert!(once.iter().any(|p| p.slug == "home"));
}

#[tokio::test]
async fn test_memory_store_seeding_is_idempotent() {
    let store = MemoryStore::new();
    assert_idempotent_seeding(&store).await;
}

#[tokio::test]
async fn test_file_store_seeding_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("store.json"), DefaultPage::standard_set())
        .await
        .unwrap();
    assert_idempotent_seeding(&store).await;
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let store = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
        store.ensure_default_pages().await.unwrap();
        store
            .upsert_content_record("page-home", "hero-heading", r#"{"content":"Hi"}"#, "text")
            .await
            .unwrap();
    }

    let reopened = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
    let pages = reopened.list_pages().await.unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].status, PageStatus::Published);

    let records = reopened.get_content_records("page-home").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].section_id, "hero-heading");
    assert_eq!(records[0].raw_text, r#"{"content":"Hi"}"#);
}

#[tokio::test]
async fn test_upsert_to_unknown_page_fails() {
    let store = MemoryStore::new();
    store.ensure_default_pages().await.unwrap();

    let result = store
        .upsert_content_record("page-ghost", "s", "x", "text")
        .await;
    assert!(matches!(result, Err(StoreError::PageNotFound(id)) if id == "page-ghost"));
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json").unwrap();

    let result = JsonFileStore::open(&path, vec![]).await;
    assert!(matches!(result, Err(StoreError::Malformed(_))));
}

#[tokio::test]
async fn test_file_store_failed_write_is_not_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let store = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
    store.ensure_default_pages().await.unwrap();

    // A directory in place of the file makes every write fail
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let result = store
        .upsert_content_record("page-home", "hero-heading", "Hi", "text")
        .await;
    assert!(matches!(result, Err(StoreError::Io(_))));
    assert!(store.get_content_records("page-home").await.unwrap().is_empty());

    std::fs::remove_dir(&path).unwrap();
    store
        .upsert_content_record("page-home", "intro", "Hello", "text")
        .await
        .unwrap();

    let reopened = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
    let records = reopened.get_content_records("page-home").await.unwrap();
    let sections: Vec<&str> = records.iter().map(|r| r.section_id.as_str()).collect();
    assert_eq!(sections, vec!["intro"]);
}

#[tokio::test]
async fn test_file_store_seeding_retries_after_failed_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
    std::fs::create_dir(&path).unwrap();
    assert!(store.ensure_default_pages().await.is_err());
    assert!(store.list_pages().await.unwrap().is_empty());

    std::fs::remove_dir(&path).unwrap();
    store.ensure_default_pages().await.unwrap();

    let reopened = JsonFileStore::open(&path, DefaultPage::standard_set()).await.unwrap();
    assert_eq!(reopened.list_pages().await.unwrap().len(), 2);
}
