//! History reconstruction — the computed win/loss view, never stored.
//!
//! Replays the event log against a working copy of the ratings to recover
//! what each comparison looked like when it happened. The view is scoped to
//! the currently loaded items: events that reference an id outside the item
//! list are skipped wholesale (neither displayed nor applied), so a stale
//! event cannot perturb the replay of items that are present.

use std::collections::BTreeMap;

use crate::{
  item::Item,
  rating::{DEFAULT_RATING, K_FACTOR, elo_update},
  store::Store,
};

/// One visible win/loss line. Draws advance the working state but emit no
/// entry.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
  pub timestamp_ms: i64,
  pub winner:       String,
  pub loser:        String,
  pub winner_old:   f64,
  pub winner_new:   f64,
  pub loser_old:    f64,
  pub loser_new:    f64,
}

/// Replay `store.events` in log order (log order is chronological by
/// construction) and return the visible entries, oldest first. Callers
/// reverse for most-recent-first display.
///
/// Idempotent: the same `(items, store)` always yields the same sequence.
pub fn reconstruct(items: &[Item], store: &Store) -> Vec<HistoryEntry> {
  // Working state seeded from the materialized table, defaulting items the
  // table has never seen.
  let mut names: BTreeMap<&str, &str> = BTreeMap::new();
  let mut working: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
  for item in items {
    names.insert(&item.id, &item.display_name);
    let seed = store
      .rating_for(&item.id)
      .map(|r| (r.rating, r.games_played))
      .unwrap_or((DEFAULT_RATING, 0));
    working.insert(&item.id, seed);
  }

  let mut entries = Vec::new();

  for event in &store.events {
    let (Some(&name_a), Some(&name_b)) =
      (names.get(event.item_a.as_str()), names.get(event.item_b.as_str()))
    else {
      continue;
    };

    let (old_a, games_a) = working[event.item_a.as_str()];
    let (old_b, games_b) = working[event.item_b.as_str()];
    let score_a = event.outcome.score_for_first();
    let (new_a, new_b) = elo_update(old_a, old_b, score_a, K_FACTOR);

    working.insert(&event.item_a, (new_a, games_a + 1));
    working.insert(&event.item_b, (new_b, games_b + 1));

    if event.outcome.is_draw() {
      continue;
    }

    let entry = if score_a == 1.0 {
      HistoryEntry {
        timestamp_ms: event.timestamp_ms,
        winner:       name_a.to_string(),
        loser:        name_b.to_string(),
        winner_old:   old_a,
        winner_new:   new_a,
        loser_old:    old_b,
        loser_new:    new_b,
      }
    } else {
      HistoryEntry {
        timestamp_ms: event.timestamp_ms,
        winner:       name_b.to_string(),
        loser:        name_a.to_string(),
        winner_old:   old_b,
        winner_new:   new_b,
        loser_old:    old_a,
        loser_new:    new_a,
      }
    };
    entries.push(entry);
  }

  entries
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    event::{ComparisonEvent, Outcome},
    rating::RatingRecord,
  };

  fn item(id: &str) -> Item {
    Item {
      id:            id.to_string(),
      display_name:  id.trim_end_matches(".md").to_string(),
      rating:        DEFAULT_RATING,
      games_played:  0,
      pool_id:       "default".to_string(),
      last_compared: None,
    }
  }

  fn event(t: i64, a: &str, b: &str, outcome: Outcome) -> ComparisonEvent {
    ComparisonEvent {
      timestamp_ms: t,
      item_a:       a.to_string(),
      item_b:       b.to_string(),
      outcome,
    }
  }

  #[test]
  fn single_win_produces_one_entry_with_old_and_new_ratings() {
    let items = vec![item("a.md"), item("b.md")];
    let mut store = Store::default();
    store.events.push(event(1, "a.md", "b.md", Outcome::FirstWon));

    let entries = reconstruct(&items, &store);
    assert_eq!(entries.len(), 1);
    let e = &entries[0];
    assert_eq!(e.winner, "a");
    assert_eq!(e.loser, "b");
    assert_eq!((e.winner_old, e.winner_new), (1000.0, 1016.0));
    assert_eq!((e.loser_old, e.loser_new), (1000.0, 984.0));
  }

  #[test]
  fn second_item_winning_swaps_the_roles() {
    let items = vec![item("a.md"), item("b.md")];
    let mut store = Store::default();
    store.events.push(event(1, "a.md", "b.md", Outcome::SecondWon));

    let entries = reconstruct(&items, &store);
    assert_eq!(entries[0].winner, "b");
    assert_eq!(entries[0].loser, "a");
  }

  #[test]
  fn draws_advance_working_state_but_emit_no_entry() {
    let items = vec![item("a.md"), item("b.md"), item("c.md")];
    let mut store = Store::default();
    // Unequal draw shifts both ratings, which must be visible in the next
    // entry's old ratings.
    store.ratings.insert("a.md".into(), RatingRecord {
      rating:        1200.0,
      games_played:  3,
      pool_id:       "default".into(),
      last_compared: None,
    });
    store.events.push(event(1, "a.md", "b.md", Outcome::Draw));
    store.events.push(event(2, "a.md", "c.md", Outcome::FirstWon));

    let entries = reconstruct(&items, &store);
    assert_eq!(entries.len(), 1);
    // Draw at 1200 vs 1000: a loses ground despite the draw.
    assert!(entries[0].winner_old < 1200.0);
    assert_eq!(entries[0].winner, "a");
  }

  #[test]
  fn events_for_unknown_items_are_skipped_entirely() {
    let items = vec![item("a.md"), item("b.md")];
    let mut store = Store::default();
    store.events.push(event(1, "a.md", "gone.md", Outcome::FirstWon));
    store.events.push(event(2, "a.md", "b.md", Outcome::FirstWon));

    let entries = reconstruct(&items, &store);
    // The event against the missing item neither appears nor affects a's
    // working rating for the later event.
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].winner_old, 1000.0);
  }

  #[test]
  fn reconstruction_is_idempotent() {
    let items = vec![item("a.md"), item("b.md"), item("c.md")];
    let mut store = Store::default();
    store.events.push(event(1, "a.md", "b.md", Outcome::FirstWon));
    store.events.push(event(2, "b.md", "c.md", Outcome::SecondWon));
    store.events.push(event(3, "a.md", "c.md", Outcome::Draw));

    assert_eq!(reconstruct(&items, &store), reconstruct(&items, &store));
  }

  #[test]
  fn working_state_is_seeded_from_the_materialized_table() {
    let items = vec![item("a.md"), item("b.md")];
    let mut store = Store::default();
    store.ratings.insert("a.md".into(), RatingRecord {
      rating:        1400.0,
      games_played:  10,
      pool_id:       "default".into(),
      last_compared: None,
    });
    store.events.push(event(1, "a.md", "b.md", Outcome::FirstWon));

    let entries = reconstruct(&items, &store);
    assert_eq!(entries[0].winner_old, 1400.0);
    assert_eq!(entries[0].loser_old, 1000.0);
  }
}
