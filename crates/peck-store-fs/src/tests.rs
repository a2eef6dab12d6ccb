//! Integration tests for the filesystem store, driving the full
//! [`StoreLayout`] over real temporary directories.

use peck_core::{
  event::{ComparisonEvent, Outcome},
  rating::RatingRecord,
  storage::StoreLayout,
  store::{DocumentStore, Store},
};
use tempfile::TempDir;

use crate::FsDocumentStore;

fn layout(dir: &TempDir) -> StoreLayout<FsDocumentStore> {
  StoreLayout::new(FsDocumentStore::new(dir.path()))
}

fn sample_store() -> Store {
  let mut store = Store::default();
  store.events.push(ComparisonEvent {
    timestamp_ms: 1_700_000_000_000,
    item_a:       "books/dune.md".into(),
    item_b:       "books/hyperion.md".into(),
    outcome:      Outcome::FirstWon,
  });
  store.ratings.insert("books/dune.md".into(), RatingRecord {
    rating:        1016.0,
    games_played:  1,
    pool_id:       "books".into(),
    last_compared: None,
  });
  store.ratings.insert("books/hyperion.md".into(), RatingRecord {
    rating:        984.0,
    games_played:  1,
    pool_id:       "books".into(),
    last_compared: None,
  });
  store
}

// ─── Document primitives ─────────────────────────────────────────────────────

#[tokio::test]
async fn read_of_absent_document_is_none() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  assert_eq!(docs.read("history/events-default.json").await.unwrap(), None);
  assert!(!docs.exists("history/events-default.json").await.unwrap());
}

#[tokio::test]
async fn write_creates_parent_directories() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  docs.write("history/events-books.json", "[]").await.unwrap();
  assert_eq!(
    docs.read("history/events-books.json").await.unwrap().as_deref(),
    Some("[]")
  );
}

#[tokio::test]
async fn remove_is_idempotent() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  docs.write("history/ratings-books.json", "{}").await.unwrap();
  docs.remove("history/ratings-books.json").await.unwrap();
  docs.remove("history/ratings-books.json").await.unwrap();
  assert!(!docs.exists("history/ratings-books.json").await.unwrap());
}

#[tokio::test]
async fn parent_escapes_are_rejected() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  let err = docs.write("../outside.json", "x").await.unwrap_err();
  assert!(matches!(err, crate::Error::InvalidPath(_)));
}

// ─── Store layout ────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_pool_reads_as_the_empty_default() {
  let dir = TempDir::new().unwrap();
  let store = layout(&dir).read_store("books").await;
  assert_eq!(store, Store::default());
}

#[tokio::test]
async fn store_round_trips() {
  let dir = TempDir::new().unwrap();
  let l = layout(&dir);
  let store = sample_store();

  l.write_store("books", &store).await.unwrap();
  let reloaded = l.read_store("books").await;

  assert_eq!(reloaded.events, store.events);
  assert_eq!(reloaded.ratings, store.ratings);
}

#[tokio::test]
async fn pools_are_persisted_independently() {
  let dir = TempDir::new().unwrap();
  let l = layout(&dir);

  l.write_store("books", &sample_store()).await.unwrap();
  assert_eq!(l.read_store("movies").await, Store::default());
  assert_eq!(l.read_store("books").await.events.len(), 1);
}

#[tokio::test]
async fn corrupt_documents_degrade_to_the_default() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  docs
    .write("history/events-books.json", "this is not json")
    .await
    .unwrap();
  // Parseable JSON of the wrong shape must also fail closed.
  docs
    .write("history/ratings-books.json", r#"["not", "an", "object"]"#)
    .await
    .unwrap();

  let store = layout(&dir).read_store("books").await;
  assert_eq!(store, Store::default());
}

#[tokio::test]
async fn events_with_invalid_scores_fail_closed() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  docs
    .write(
      "history/events-books.json",
      r#"[{"t":1,"a":"a.md","b":"b.md","s":0.7}]"#,
    )
    .await
    .unwrap();

  let store = layout(&dir).read_store("books").await;
  assert!(store.events.is_empty());
}

#[tokio::test]
async fn delete_store_removes_both_documents() {
  let dir = TempDir::new().unwrap();
  let l = layout(&dir);

  l.write_store("books", &sample_store()).await.unwrap();
  l.delete_store("books").await.unwrap();

  assert!(!l.docs().exists("history/events-books.json").await.unwrap());
  assert!(!l.docs().exists("history/ratings-books.json").await.unwrap());

  // Deleting an already-deleted pool is fine.
  l.delete_store("books").await.unwrap();
}

// ─── Legacy migration ────────────────────────────────────────────────────────

#[tokio::test]
async fn legacy_documents_migrate_into_the_default_pool() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  let store = sample_store();
  docs
    .write(
      "history/events.json",
      &serde_json::to_string(&store.events).unwrap(),
    )
    .await
    .unwrap();
  docs
    .write(
      "history/ratings.json",
      &serde_json::to_string(&store.ratings).unwrap(),
    )
    .await
    .unwrap();

  let migrated = layout(&dir).read_store("default").await;
  assert_eq!(migrated.events, store.events);
  assert_eq!(migrated.ratings, store.ratings);

  // The suffixed documents now exist and serve subsequent reads.
  assert!(docs.exists("history/events-default.json").await.unwrap());
  assert!(docs.exists("history/ratings-default.json").await.unwrap());
  assert_eq!(layout(&dir).read_store("default").await.events, store.events);
}

#[tokio::test]
async fn legacy_documents_are_ignored_once_new_format_data_exists() {
  let dir = TempDir::new().unwrap();
  let l = layout(&dir);
  let docs = FsDocumentStore::new(dir.path());

  l.write_store("default", &sample_store()).await.unwrap();
  docs
    .write("history/events.json", r#"[{"t":9,"a":"x.md","b":"y.md","s":0.0}]"#)
    .await
    .unwrap();

  let store = l.read_store("default").await;
  assert_eq!(store.events.len(), 1);
  assert_eq!(store.events[0].item_a, "books/dune.md");
}

#[tokio::test]
async fn legacy_documents_are_ignored_for_named_pools() {
  let dir = TempDir::new().unwrap();
  let docs = FsDocumentStore::new(dir.path());

  docs
    .write("history/events.json", r#"[{"t":9,"a":"x.md","b":"y.md","s":1.0}]"#)
    .await
    .unwrap();

  assert_eq!(layout(&dir).read_store("books").await, Store::default());
}
