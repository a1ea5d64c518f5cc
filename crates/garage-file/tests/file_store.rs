//! Integration tests for the file-backed document store.

use garage_core::model::fields_from_value;
use garage_core::{DocId, DocumentStore, Fields, Revision};
use garage_file::FileStore;
use serde_json::json;
use tempfile::TempDir;

async fn open_store(temp_dir: &TempDir) -> FileStore {
    let store = FileStore::new(temp_dir.path(), "my-garage");
    store.ensure_database().await.unwrap();
    store
}

fn corolla() -> Fields {
    fields_from_value(json!({
        "brand": "Toyota",
        "model": "Corolla",
        "year": 2020,
        "color": "Blue",
        "engine": "I4",
        "licensePlate": "ABC123",
        "owner": { "name": "Jane", "contact": "555-0100" }
    }))
    .unwrap()
}

#[tokio::test]
async fn test_ensure_database_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path(), "my-garage");

    assert!(store.ensure_database().await.unwrap());
    assert!(!store.ensure_database().await.unwrap());
    assert!(temp_dir.path().join("my-garage").join("docs").is_dir());
}

#[tokio::test]
async fn test_operations_require_database() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path(), "missing-db");

    let err = store.list().await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_insert_assigns_id_and_first_revision() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let doc = store.insert(corolla()).await.unwrap();

    assert_eq!(doc.id.as_str().len(), 32);
    assert_eq!(doc.rev.generation(), Some(1));
    assert_eq!(doc.fields, corolla());
}

#[tokio::test]
async fn test_insert_ignores_caller_id_and_rev() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let mut fields = corolla();
    fields.insert("_id".to_string(), json!("chosen"));
    fields.insert("_rev".to_string(), json!("7-x"));
    let doc = store.insert(fields).await.unwrap();

    assert_ne!(doc.id.as_str(), "chosen");
    assert_eq!(doc.rev.generation(), Some(1));
}

#[tokio::test]
async fn test_created_document_is_listed_and_readable() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    let listed = store.list().await.unwrap();

    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(store.get(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    for _ in 0..5 {
        store.insert(corolla()).await.unwrap();
    }

    let ids: Vec<DocId> = store.list().await.unwrap().into_iter().map(|d| d.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids.len(), 5);
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_get_missing_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let err = store.get(&DocId::new("nope").unwrap()).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn test_put_issues_new_revision() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    let patch = fields_from_value(json!({ "color": "Red" })).unwrap();
    let updated = store.put(&created.merged(patch)).await.unwrap();

    assert_eq!(updated.rev.generation(), Some(2));
    assert_eq!(updated.fields["color"], "Red");
    assert_eq!(updated.fields["licensePlate"], "ABC123");
    assert_eq!(store.get(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_put_with_stale_revision_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    let patch = fields_from_value(json!({ "color": "Red" })).unwrap();
    store.put(&created.merged(patch)).await.unwrap();

    // Writing against the first revision again loses the race.
    let patch = fields_from_value(json!({ "color": "Green" })).unwrap();
    let err = store.put(&created.merged(patch)).await.unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(store.get(&created.id).await.unwrap().fields["color"], "Red");
}

#[tokio::test]
async fn test_destroy_removes_from_list_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    let outcome = store.destroy(&created.id, &created.rev).await.unwrap();

    assert!(outcome.ok);
    assert_eq!(outcome.id, created.id);
    assert_eq!(outcome.rev.generation(), Some(2));

    assert!(store.list().await.unwrap().is_empty());
    let err = store.get(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("deleted"));
}

#[tokio::test]
async fn test_second_destroy_with_stale_revision_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    store.destroy(&created.id, &created.rev).await.unwrap();

    let result = store.destroy(&created.id, &created.rev).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_destroy_with_wrong_revision_conflicts() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(&temp_dir).await;

    let created = store.insert(corolla()).await.unwrap();
    let err = store
        .destroy(&created.id, &Revision::new("1-wrong").unwrap())
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(store.get(&created.id).await.is_ok());
}

#[tokio::test]
async fn test_documents_persist_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    let created = open_store(&temp_dir).await.insert(corolla()).await.unwrap();

    let reopened = FileStore::new(temp_dir.path(), "my-garage");
    assert_eq!(reopened.get(&created.id).await.unwrap(), created);
}
