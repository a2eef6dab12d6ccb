//! Comparison events — the fundamental unit of the Peck store.
//!
//! An event is an immutable record of one pairwise decision. Events are
//! never updated; the log is append-only, bounded by a lossy retention
//! policy (age window first, then a count cap keeping the tail). History
//! beyond the bound is irrecoverable for replay purposes; the materialized
//! ratings table retains the cumulative numeric effect.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of events retained in the log.
pub const MAX_EVENTS: usize = 200;

/// Maximum age of a retained event, in days.
pub const MAX_EVENT_AGE_DAYS: i64 = 30;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// Result of one pairwise comparison, from the first item's point of view.
///
/// Serialized as the first item's score: `1`, `0`, or `0.5`. Any other
/// score fails deserialization, which callers treat as a malformed
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  FirstWon,
  SecondWon,
  Draw,
}

impl Outcome {
  /// The score credited to the first item.
  pub fn score_for_first(self) -> f64 {
    match self {
      Self::FirstWon => 1.0,
      Self::SecondWon => 0.0,
      Self::Draw => 0.5,
    }
  }

  pub fn from_score(score: f64) -> Option<Self> {
    if score == 1.0 {
      Some(Self::FirstWon)
    } else if score == 0.0 {
      Some(Self::SecondWon)
    } else if score == 0.5 {
      Some(Self::Draw)
    } else {
      None
    }
  }

  pub fn is_draw(self) -> bool { matches!(self, Self::Draw) }
}

impl Serialize for Outcome {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.score_for_first())
  }
}

impl<'de> Deserialize<'de> for Outcome {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let score = f64::deserialize(deserializer)?;
    Self::from_score(score)
      .ok_or_else(|| serde::de::Error::custom(format!("invalid outcome score: {score}")))
  }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// An immutable record of one comparison. Wire form is `{t, a, b, s}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEvent {
  /// Milliseconds since the Unix epoch.
  #[serde(rename = "t")]
  pub timestamp_ms: i64,

  /// Id of the first item.
  #[serde(rename = "a")]
  pub item_a: String,

  /// Id of the second item.
  #[serde(rename = "b")]
  pub item_b: String,

  /// Score for `item_a`.
  #[serde(rename = "s")]
  pub outcome: Outcome,
}

/// Apply the retention policy in place: drop events older than
/// [`MAX_EVENT_AGE_DAYS`] relative to `now_ms`, then keep only the most
/// recent [`MAX_EVENTS`].
pub fn apply_retention(events: &mut Vec<ComparisonEvent>, now_ms: i64) {
  let cutoff = now_ms - MAX_EVENT_AGE_DAYS * MS_PER_DAY;
  events.retain(|e| e.timestamp_ms >= cutoff);
  if events.len() > MAX_EVENTS {
    let excess = events.len() - MAX_EVENTS;
    events.drain(..excess);
  }
}
