//! Persisted store layout over a [`DocumentStore`].
//!
//! Each pool persists as two documents under `history/`:
//!
//! ```text
//! history/events-<pool>.json    JSON array of {t, a, b, s}
//! history/ratings-<pool>.json   JSON object: id → {rating, games, pool, last?}
//! ```
//!
//! Reads never fail: an absent, unreadable, or mis-shaped document degrades
//! to the empty default and is logged, so a corrupt file means "start
//! fresh" rather than a blocked session. Writes are whole-document but not
//! atomic across the pair; a crash between the two writes can leave them
//! mutually inconsistent.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
  error::{Error, Result},
  event::ComparisonEvent,
  item::DEFAULT_POOL,
  rating::RatingRecord,
  store::{DocumentStore, SCHEMA_VERSION, Store},
};

/// Directory (relative to the document-store root) holding all pool
/// documents.
pub const HISTORY_DIR: &str = "history";

/// Pre-pool document names, migrated into the `default` pool on first
/// access.
const LEGACY_EVENTS: &str = "history/events.json";
const LEGACY_RATINGS: &str = "history/ratings.json";

fn events_path(pool: &str) -> String { format!("{HISTORY_DIR}/events-{pool}.json") }

fn ratings_path(pool: &str) -> String { format!("{HISTORY_DIR}/ratings-{pool}.json") }

fn doc_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::DocumentStore(Box::new(e))
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Knows where each pool's documents live and how to fail closed when they
/// are damaged.
pub struct StoreLayout<D> {
  docs: D,
}

impl<D: DocumentStore> StoreLayout<D> {
  pub fn new(docs: D) -> Self { Self { docs } }

  pub fn docs(&self) -> &D { &self.docs }

  /// Load the store for `pool`, degrading damaged or absent documents to
  /// the empty default. For the `default` pool, falls back to the legacy
  /// un-suffixed documents and migrates them forward.
  pub async fn read_store(&self, pool: &str) -> Store {
    let events: Option<Vec<ComparisonEvent>> = self.read_json(&events_path(pool)).await;
    let ratings: Option<BTreeMap<String, RatingRecord>> =
      self.read_json(&ratings_path(pool)).await;

    let nothing_yet = events.as_ref().is_none_or(Vec::is_empty)
      && ratings.as_ref().is_none_or(BTreeMap::is_empty);

    if pool == DEFAULT_POOL && nothing_yet {
      if let Some(migrated) = self.migrate_legacy().await {
        return migrated;
      }
    }

    Store {
      schema_version: SCHEMA_VERSION,
      events:         events.unwrap_or_default(),
      ratings:        ratings.unwrap_or_default(),
    }
  }

  /// Persist both documents for `pool`. The store counts as durably saved
  /// only when both writes succeed.
  pub async fn write_store(&self, pool: &str, store: &Store) -> Result<()> {
    self.docs.create_dir_all(HISTORY_DIR).await.map_err(doc_err)?;

    let events = serde_json::to_string(&store.events)?;
    let ratings = serde_json::to_string(&store.ratings)?;

    self
      .docs
      .write(&events_path(pool), &events)
      .await
      .map_err(doc_err)?;
    self
      .docs
      .write(&ratings_path(pool), &ratings)
      .await
      .map_err(doc_err)?;
    Ok(())
  }

  /// Remove both documents for `pool`. Absent documents are not an error.
  pub async fn delete_store(&self, pool: &str) -> Result<()> {
    self.docs.remove(&events_path(pool)).await.map_err(doc_err)?;
    self.docs.remove(&ratings_path(pool)).await.map_err(doc_err)?;
    Ok(())
  }

  /// Read the legacy single-pool documents if either exists, and rewrite
  /// them under the `default` suffix. The migrated store is served even
  /// when the rewrite fails.
  async fn migrate_legacy(&self) -> Option<Store> {
    let events: Option<Vec<ComparisonEvent>> = self.read_json(LEGACY_EVENTS).await;
    let ratings: Option<BTreeMap<String, RatingRecord>> =
      self.read_json(LEGACY_RATINGS).await;

    if events.is_none() && ratings.is_none() {
      return None;
    }

    let store = Store {
      schema_version: SCHEMA_VERSION,
      events:         events.unwrap_or_default(),
      ratings:        ratings.unwrap_or_default(),
    };

    match self.write_store(DEFAULT_POOL, &store).await {
      Ok(()) => info!("migrated legacy single-pool store to the default pool"),
      Err(e) => warn!(error = %e, "failed to persist migrated legacy store"),
    }

    Some(store)
  }

  /// Strict read: any failure (I/O, absent, wrong shape) becomes `None`,
  /// logged at `warn` except for plain absence.
  async fn read_json<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
    let raw = match self.docs.read(path).await {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        warn!(path, error = %e, "document read failed; treating as absent");
        return None;
      }
    };

    match serde_json::from_str(&raw) {
      Ok(value) => Some(value),
      Err(e) => {
        warn!(path, error = %e, "malformed document; falling back to empty default");
        None
      }
    }
  }
}
