//! The Elo rating update and the materialized per-item rating record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rating assigned to an item with no stored record.
pub const DEFAULT_RATING: f64 = 1000.0;

/// Magnitude of rating change per comparison. Applied uniformly; never
/// adapted per item.
pub const K_FACTOR: f64 = 32.0;

/// Probability that the first player wins, given both ratings.
///
/// Equal ratings give exactly 0.5. A very large gap saturates toward 0 or 1
/// but never reaches either.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
  1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Compute both players' new ratings from the score of the first player
/// (1 win, 0 loss, 0.5 draw).
///
/// Results are rounded half-away-from-zero and are not clamped; ratings may
/// drift below zero.
pub fn elo_update(rating_a: f64, rating_b: f64, score_a: f64, k: f64) -> (f64, f64) {
  let exp_a = expected_score(rating_a, rating_b);
  let exp_b = 1.0 - exp_a;
  let score_b = 1.0 - score_a;
  (
    (rating_a + k * (score_a - exp_a)).round(),
    (rating_b + k * (score_b - exp_b)).round(),
  )
}

// ─── Materialized record ─────────────────────────────────────────────────────

/// Per-item projection of all events affecting that item. Persisted in the
/// ratings document keyed by item id; survives event-log truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
  pub rating: f64,

  #[serde(rename = "games")]
  pub games_played: u32,

  #[serde(rename = "pool")]
  pub pool_id: String,

  #[serde(rename = "last", default, skip_serializing_if = "Option::is_none")]
  pub last_compared: Option<NaiveDate>,
}

impl RatingRecord {
  /// Record for an item that has never been compared.
  pub fn fresh(pool_id: impl Into<String>) -> Self {
    Self {
      rating:        DEFAULT_RATING,
      games_played:  0,
      pool_id:       pool_id.into(),
      last_compared: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expected_score_equal_ratings_is_half() {
    assert_eq!(expected_score(1000.0, 1000.0), 0.5);
  }

  #[test]
  fn expected_score_saturates_without_reaching_bounds() {
    let high = expected_score(5000.0, 0.0);
    assert!(high > 0.999);
    assert!(high < 1.0);
  }

  #[test]
  fn equal_win_moves_each_side_by_half_k() {
    let (a, b) = elo_update(1000.0, 1000.0, 1.0, K_FACTOR);
    assert_eq!(a, 1016.0);
    assert_eq!(b, 984.0);
  }

  #[test]
  fn equal_draw_changes_nothing() {
    let (a, b) = elo_update(1000.0, 1000.0, 0.5, K_FACTOR);
    assert_eq!(a, 1000.0);
    assert_eq!(b, 1000.0);
  }

  #[test]
  fn deltas_are_antisymmetric_within_rounding() {
    for (ra, rb, s) in [
      (1000.0, 1000.0, 1.0),
      (1500.0, 1200.0, 0.0),
      (800.0, 2400.0, 0.5),
      (-50.0, 130.0, 1.0),
    ] {
      let (na, nb) = elo_update(ra, rb, s, K_FACTOR);
      let delta_a = na - ra;
      let delta_b = nb - rb;
      // Each side is rounded independently, so allow one unit of slack.
      assert!((delta_a + delta_b).abs() <= 1.0, "ra={ra} rb={rb} s={s}");
    }
  }

  #[test]
  fn underdog_win_gains_more_than_favourite_win() {
    let (underdog, _) = elo_update(1000.0, 1400.0, 1.0, K_FACTOR);
    let (favourite, _) = elo_update(1400.0, 1000.0, 1.0, K_FACTOR);
    assert!(underdog - 1000.0 > favourite - 1400.0);
  }

  #[test]
  fn ratings_are_not_clamped_below_zero() {
    let (_, loser) = elo_update(10.0, 4.0, 1.0, K_FACTOR);
    assert!(loser < 0.0);
  }
}
