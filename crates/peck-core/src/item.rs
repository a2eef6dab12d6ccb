//! Items and pool configuration.
//!
//! An item is a comparable entity supplied by an [`ItemSource`] backend.
//! The core never creates items itself; it only merges stored ratings into
//! them and updates them as comparisons are recorded.
//!
//! [`ItemSource`]: crate::store::ItemSource

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A comparable entity with a stable identifier and a live rating.
///
/// `id` is a path relative to the vault root and is the key under which the
/// item's [`RatingRecord`](crate::rating::RatingRecord) is persisted. The
/// rating an item source seeds here is provisional; the session replaces it
/// with the stored rating (or the default) on merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub id:            String,
  pub display_name:  String,
  pub rating:        f64,
  pub games_played:  u32,
  pub pool_id:       String,
  pub last_compared: Option<NaiveDate>,
}

/// A named, independently configured and independently persisted grouping
/// of comparable items (e.g. "books").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
  /// Pool identifier; suffixes the persisted document names.
  pub name:     String,
  /// Folder below the vault root to scan, `""` for the whole vault.
  pub folder:   String,
  /// Frontmatter property that admits a file as comparable.
  pub property: String,
}

/// Name of the pool used when none is configured. The legacy un-suffixed
/// store documents migrate into this pool.
pub const DEFAULT_POOL: &str = "default";

impl PoolConfig {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      folder:   String::new(),
      property: "rating".to_string(),
    }
  }
}

impl Default for PoolConfig {
  fn default() -> Self { Self::new(DEFAULT_POOL) }
}
