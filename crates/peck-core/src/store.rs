//! The in-memory store model and the capability traits the core depends on.
//!
//! The traits are implemented by backends (`peck-store-fs`, `peck-vault`).
//! Higher layers (`peck-cli`) depend on these abstractions, not on any
//! concrete backend.

use std::{collections::BTreeMap, future::Future};

use crate::{
  event::{self, ComparisonEvent},
  item::{Item, PoolConfig},
  rating::RatingRecord,
};

/// Version of the persisted store model.
pub const SCHEMA_VERSION: u32 = 1;

// ─── Store ───────────────────────────────────────────────────────────────────

/// The pairing of an event log and a materialized ratings table for one
/// pool. Persisted as two separate JSON documents.
///
/// The ratings table is in principle derivable by replaying `events` from
/// default ratings — but the log is truncated (see [`event::apply_retention`]),
/// so the table is the durable source of truth for live ratings, and replay
/// serves only the history view.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
  pub schema_version: u32,
  pub events:         Vec<ComparisonEvent>,
  pub ratings:        BTreeMap<String, RatingRecord>,
}

impl Default for Store {
  fn default() -> Self {
    Self {
      schema_version: SCHEMA_VERSION,
      events:         Vec::new(),
      ratings:        BTreeMap::new(),
    }
  }
}

impl Store {
  /// Append one event and apply the retention policy.
  pub fn append_event(&mut self, event: ComparisonEvent, now_ms: i64) {
    self.events.push(event);
    event::apply_retention(&mut self.events, now_ms);
  }

  pub fn rating_for(&self, id: &str) -> Option<&RatingRecord> { self.ratings.get(id) }

  pub fn is_empty(&self) -> bool { self.events.is_empty() && self.ratings.is_empty() }
}

// ─── Capability traits ───────────────────────────────────────────────────────

/// Abstraction over a keyed document store (a directory of small text
/// documents addressed by relative, `/`-separated path strings).
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether a document exists at `path`.
  fn exists<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Read a document. `Ok(None)` means the document is absent.
  fn read<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Write a document whole, creating or replacing it.
  fn write<'a>(
    &'a self,
    path: &'a str,
    contents: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove a document. Removing an absent document is not an error.
  fn remove<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Create a directory (and any missing parents).
  fn create_dir_all<'a>(
    &'a self,
    path: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// Abstraction over a source of candidate items for a pool.
pub trait ItemSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// List the comparable items for `pool`. Items lacking a usable
  /// rating-source property are excluded, never reported as errors.
  fn load_items<'a>(
    &'a self,
    pool: &'a PoolConfig,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + 'a;
}
