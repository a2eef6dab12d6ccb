//! The comparison session controller.
//!
//! The only stateful orchestration in the system: loads items and the
//! persisted store concurrently, merges them exactly once per load cycle,
//! then cycles pair selection → user decision → rating update → event
//! append → persist. An explicit [`Phase`] guards the transitions; there
//! are no ad hoc boolean latches.
//!
//! Persistence failures never escape: a failed store read degrades to the
//! empty store, a failed write is logged and surfaced through
//! [`Session::last_error`], and the session proceeds on in-memory state.

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use tracing::warn;

use crate::{
  error::{Error, Result},
  event::{ComparisonEvent, Outcome},
  history::{HistoryEntry, reconstruct},
  item::{Item, PoolConfig},
  pairing::select_pair,
  rating::{DEFAULT_RATING, K_FACTOR, RatingRecord, elo_update},
  storage::StoreLayout,
  store::{DocumentStore, ItemSource, Store},
};

// ─── Phase ───────────────────────────────────────────────────────────────────

/// Lifecycle of a session. The merge of stored ratings into items happens
/// on the single `Loading → Ready` transition, so a store mutated by later
/// user actions can never re-trigger it and clobber in-progress state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Nothing loaded yet.
  Idle,
  /// Store and items are loading concurrently.
  Loading,
  /// Merged and comparable; decisions are accepted.
  Ready,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Orchestrates one user's comparison run for one pool.
pub struct Session<D, S> {
  layout: StoreLayout<D>,
  source: S,
  pool:   PoolConfig,

  phase:      Phase,
  store:      Store,
  items:      Vec<Item>,
  pair:       Option<(usize, usize)>,
  /// Most-recent-first, ready for display.
  history:    Vec<HistoryEntry>,
  last_error: Option<String>,

  rng: StdRng,
}

impl<D: DocumentStore, S: ItemSource> Session<D, S> {
  pub fn new(docs: D, source: S, pool: PoolConfig) -> Self {
    Self {
      layout: StoreLayout::new(docs),
      source,
      pool,
      phase: Phase::Idle,
      store: Store::default(),
      items: Vec::new(),
      pair: None,
      history: Vec::new(),
      last_error: None,
      rng: StdRng::from_os_rng(),
    }
  }

  // ── Observable state ──────────────────────────────────────────────────────

  pub fn phase(&self) -> Phase { self.phase }

  pub fn pool(&self) -> &PoolConfig { &self.pool }

  pub fn items(&self) -> &[Item] { &self.items }

  /// The pair currently offered for comparison. `None` before the first
  /// load or when no items exist; equal indices mean "fewer than two
  /// items".
  pub fn pair(&self) -> Option<(usize, usize)> { self.pair }

  pub fn history(&self) -> &[HistoryEntry] { &self.history }

  pub fn store(&self) -> &Store { &self.store }

  /// The last swallowed persistence failure, cleared by the next
  /// successful write.
  pub fn last_error(&self) -> Option<&str> { self.last_error.as_deref() }

  /// Items sorted for display: rating descending, id ascending on ties.
  pub fn standings(&self) -> Vec<&Item> {
    let mut ranked: Vec<&Item> = self.items.iter().collect();
    ranked.sort_by(|a, b| {
      b.rating
        .partial_cmp(&a.rating)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
    });
    ranked
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Load the store and the item list concurrently, then merge and select
  /// the first pair.
  ///
  /// A store read never fails (damaged documents degrade to the empty
  /// default); an item-source failure aborts the load and returns the
  /// session to `Idle`.
  pub async fn load(&mut self) -> Result<()> {
    if self.phase == Phase::Loading {
      return Ok(());
    }
    self.phase = Phase::Loading;

    let (store, items) = tokio::join!(
      self.layout.read_store(&self.pool.name),
      self.source.load_items(&self.pool),
    );

    let items = match items {
      Ok(items) => items,
      Err(e) => {
        self.phase = Phase::Idle;
        return Err(Error::ItemSource(Box::new(e)));
      }
    };

    self.store = store;
    self.items = items;
    self.merge_stored_ratings();

    let mut history = reconstruct(&self.items, &self.store);
    history.reverse();
    self.history = history;

    self.next_pair();
    self.phase = Phase::Ready;
    Ok(())
  }

  /// Item's live rating becomes the stored rating, or the default for
  /// items the store has never seen. The provisional rating the item
  /// source seeded is discarded either way.
  fn merge_stored_ratings(&mut self) {
    for item in &mut self.items {
      match self.store.rating_for(&item.id) {
        Some(record) => {
          item.rating = record.rating;
          item.games_played = record.games_played;
          item.last_compared = record.last_compared;
        }
        None => {
          item.rating = DEFAULT_RATING;
          item.games_played = 0;
          item.last_compared = None;
        }
      }
    }
  }

  // ── Decisions ─────────────────────────────────────────────────────────────

  /// Record the outcome for the current pair: update both items, append
  /// the event, update the materialized table for exactly the two involved
  /// items, persist, and move to a fresh pair.
  ///
  /// A no-op unless the session is `Ready` with a real (distinct) pair —
  /// this is what prevents lost updates while persistence is still
  /// loading.
  pub async fn record_outcome(&mut self, outcome: Outcome) {
    if self.phase != Phase::Ready {
      return;
    }
    let Some((first, second)) = self.pair else { return };
    if first == second {
      return;
    }

    let now = Utc::now();
    let now_ms = now.timestamp_millis();
    let today = now.date_naive();

    let score_first = outcome.score_for_first();
    let old_first = self.items[first].rating;
    let old_second = self.items[second].rating;
    let (new_first, new_second) = elo_update(old_first, old_second, score_first, K_FACTOR);

    if !outcome.is_draw() {
      let (w, l, w_old, w_new, l_old, l_new) = if score_first == 1.0 {
        (first, second, old_first, new_first, old_second, new_second)
      } else {
        (second, first, old_second, new_second, old_first, new_first)
      };
      self.history.insert(0, HistoryEntry {
        timestamp_ms: now_ms,
        winner:       self.items[w].display_name.clone(),
        loser:        self.items[l].display_name.clone(),
        winner_old:   w_old,
        winner_new:   w_new,
        loser_old:    l_old,
        loser_new:    l_new,
      });
    }

    for (idx, rating) in [(first, new_first), (second, new_second)] {
      let item = &mut self.items[idx];
      item.rating = rating;
      item.games_played += 1;
      item.last_compared = Some(today);
      self.store.ratings.insert(item.id.clone(), RatingRecord {
        rating,
        games_played: item.games_played,
        pool_id: self.pool.name.clone(),
        last_compared: Some(today),
      });
    }

    self.store.append_event(
      ComparisonEvent {
        timestamp_ms: now_ms,
        item_a:       self.items[first].id.clone(),
        item_b:       self.items[second].id.clone(),
        outcome,
      },
      now_ms,
    );

    self.persist().await;
    self.next_pair();
  }

  /// Offer a fresh pair without recording anything.
  pub fn skip(&mut self) {
    if self.phase == Phase::Ready {
      self.next_pair();
    }
  }

  /// Drop one item from the working set. The persisted store is left
  /// untouched; the item returns on the next load.
  pub fn remove_item(&mut self, index: usize) {
    if self.phase != Phase::Ready || index >= self.items.len() {
      return;
    }
    self.items.remove(index);
    self.next_pair();
  }

  // ── Destructive actions (confirmation is the caller's duty) ───────────────

  /// Replace the store with the empty default, persist it, and reset all
  /// live ratings. The session drops back to `Idle` so a future load
  /// re-runs the one-time merge.
  pub async fn reset(&mut self) {
    self.store = Store::default();
    self.persist().await;
    self.reset_in_memory();
  }

  /// Delete the pool's persisted documents entirely and reset in-memory
  /// state.
  pub async fn delete_pool(&mut self) {
    if let Err(e) = self.layout.delete_store(&self.pool.name).await {
      warn!(pool = %self.pool.name, error = %e, "failed to delete pool documents");
      self.last_error = Some(format!("{e}"));
    } else {
      self.last_error = None;
    }
    self.store = Store::default();
    self.reset_in_memory();
  }

  fn reset_in_memory(&mut self) {
    for item in &mut self.items {
      item.rating = DEFAULT_RATING;
      item.games_played = 0;
      item.last_compared = None;
    }
    self.history.clear();
    self.pair = None;
    self.phase = Phase::Idle;
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  /// Persist the store, best-effort. Failures are logged and surfaced via
  /// [`Self::last_error`], never propagated — the session carries on with
  /// in-memory state.
  async fn persist(&mut self) {
    match self.layout.write_store(&self.pool.name, &self.store).await {
      Ok(()) => self.last_error = None,
      Err(e) => {
        warn!(pool = %self.pool.name, error = %e, "failed to persist store; continuing in memory");
        self.last_error = Some(format!("{e}"));
      }
    }
  }

  fn next_pair(&mut self) {
    self.pair = if self.items.is_empty() {
      None
    } else {
      Some(select_pair(&self.items, &mut self.rng))
    };
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
