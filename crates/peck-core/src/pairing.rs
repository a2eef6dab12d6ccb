//! Pair selection — chooses the next two items to compare.
//!
//! Greedy, session-local heuristic: the first pick is drawn uniformly from
//! the least-compared items; the second from the less-compared half of the
//! remainder. It favours currently-starved items on every pick but makes
//! no global fairness guarantee.

use rand::Rng;

use crate::item::Item;

/// Select two distinct indices to compare next, or the degenerate `(0, 0)`
/// when fewer than two items exist.
///
/// The first index always belongs to the set of items whose `games_played`
/// equals the minimum.
pub fn select_pair(items: &[Item], rng: &mut impl Rng) -> (usize, usize) {
  if items.len() < 2 {
    return (0, 0);
  }

  let Some(min_games) = items.iter().map(|i| i.games_played).min() else {
    return uniform_distinct(items.len(), rng);
  };

  let least_played: Vec<usize> = items
    .iter()
    .enumerate()
    .filter(|(_, item)| item.games_played == min_games)
    .map(|(idx, _)| idx)
    .collect();

  // Unreachable for a non-empty slice; kept as the fallback the degenerate
  // path demands.
  if least_played.is_empty() {
    return uniform_distinct(items.len(), rng);
  }

  let first = least_played[rng.random_range(0..least_played.len())];

  // Remaining items, least-compared half first.
  let mut rest: Vec<usize> = (0..items.len()).filter(|&i| i != first).collect();
  rest.sort_by_key(|&i| items[i].games_played);
  let half = rest.len().div_ceil(2);
  let second = rest[rng.random_range(0..half)];

  (first, second)
}

/// Two uniformly random distinct indices in `0..len` (requires `len >= 2`).
fn uniform_distinct(len: usize, rng: &mut impl Rng) -> (usize, usize) {
  let first = rng.random_range(0..len);
  let second = (first + 1 + rng.random_range(0..len - 1)) % len;
  (first, second)
}

#[cfg(test)]
mod tests {
  use rand::{SeedableRng, rngs::StdRng};

  use super::*;

  fn item(id: &str, games: u32) -> Item {
    Item {
      id:            id.to_string(),
      display_name:  id.to_string(),
      rating:        1000.0,
      games_played:  games,
      pool_id:       "default".to_string(),
      last_compared: None,
    }
  }

  #[test]
  fn fewer_than_two_items_degenerates() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(select_pair(&[], &mut rng), (0, 0));
    assert_eq!(select_pair(&[item("a", 3)], &mut rng), (0, 0));
  }

  #[test]
  fn indices_are_always_distinct() {
    let items: Vec<_> = (0..9).map(|i| item(&format!("n{i}"), i % 4)).collect();
    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (a, b) = select_pair(&items, &mut rng);
      assert_ne!(a, b, "seed {seed}");
      assert!(a < items.len() && b < items.len());
    }
  }

  #[test]
  fn first_pick_has_minimum_games() {
    let items = vec![
      item("a", 5),
      item("b", 0),
      item("c", 2),
      item("d", 0),
      item("e", 9),
    ];
    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (first, _) = select_pair(&items, &mut rng);
      assert_eq!(items[first].games_played, 0, "seed {seed}");
    }
  }

  #[test]
  fn second_pick_comes_from_the_less_compared_half() {
    // One starved item and a sharply split remainder: the second pick must
    // never land in the heavily-compared upper half.
    let items = vec![
      item("starved", 0),
      item("low1", 1),
      item("low2", 1),
      item("high1", 50),
      item("high2", 60),
    ];
    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (first, second) = select_pair(&items, &mut rng);
      assert_eq!(first, 0, "seed {seed}");
      // rest sorted: low1, low2, (one of high) — ceil(4/2) = 2 candidates.
      assert!(items[second].games_played <= 1, "seed {seed} picked {second}");
    }
  }

  #[test]
  fn uniform_fallback_yields_distinct_indices() {
    for seed in 0..200 {
      let mut rng = StdRng::seed_from_u64(seed);
      let (a, b) = uniform_distinct(5, &mut rng);
      assert_ne!(a, b);
      assert!(a < 5 && b < 5);
    }
  }
}
