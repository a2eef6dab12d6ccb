//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use peck_core::{event::Outcome, item::Item, session::Session};
use peck_store_fs::FsDocumentStore;
use peck_vault::VaultSource;

// ─── Mode ─────────────────────────────────────────────────────────────────────

/// Which pane has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// The comparison view: two cards, pick a winner.
  Duel,
  /// The ranking table.
  Standings,
  /// Reconstructed win/loss log, most recent first.
  History,
}

/// A destructive action awaiting y/n confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
  Reset,
  DeletePool,
}

impl ConfirmAction {
  pub fn prompt(self) -> &'static str {
    match self {
      Self::Reset => "Reset all ratings and history for this pool?",
      Self::DeletePool => "Delete this pool's persisted data entirely?",
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state wrapping the comparison session.
pub struct App {
  pub session: Session<FsDocumentStore, VaultSource>,

  pub mode: Mode,

  /// Pending destructive action, if a confirmation modal is open.
  pub confirm: Option<ConfirmAction>,

  /// Fuzzy-filter string for the standings pane.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* standings list.
  pub standings_cursor: usize,

  /// Scroll offset within the history pane.
  pub history_scroll: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(session: Session<FsDocumentStore, VaultSource>) -> Self {
    Self {
      session,
      mode: Mode::Duel,
      confirm: None,
      filter: String::new(),
      filter_active: false,
      standings_cursor: 0,
      history_scroll: 0,
      status_msg: String::new(),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Load (or reload) the session: store and items concurrently, then the
  /// one-time merge.
  pub async fn load(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    match self.session.load().await {
      Ok(()) => {
        self.status_msg = String::new();
        self.standings_cursor = 0;
        self.history_scroll = 0;
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e.into())
      }
    }
  }

  // ── Filtered standings ────────────────────────────────────────────────────

  /// Standings rows matching the current filter query.
  pub fn filtered_standings(&self) -> Vec<&Item> {
    let ranked = self.session.standings();
    if self.filter.is_empty() {
      return ranked;
    }
    let matcher = SkimMatcherV2::default();
    ranked
      .into_iter()
      .filter(|item| {
        matcher.fuzzy_match(&item.display_name, &self.filter).is_some()
          || matcher.fuzzy_match(&item.id, &self.filter).is_some()
      })
      .collect()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // An open confirmation modal captures everything.
    if let Some(action) = self.confirm {
      return self.handle_confirm_key(key, action).await;
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return Ok(self.handle_filter_key(key));
    }

    match self.mode {
      Mode::Duel => self.handle_duel_key(key).await,
      Mode::Standings => Ok(self.handle_standings_key(key)),
      Mode::History => Ok(self.handle_history_key(key)),
    }
  }

  async fn handle_confirm_key(
    &mut self,
    key: KeyEvent,
    action: ConfirmAction,
  ) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => {
        self.confirm = None;
        match action {
          ConfirmAction::Reset => {
            self.session.reset().await;
            self.load().await?;
            self.status_msg = "Ratings and history reset.".into();
          }
          ConfirmAction::DeletePool => {
            self.session.delete_pool().await;
            self.load().await?;
            self.status_msg =
              format!("Deleted persisted data for pool '{}'.", self.session.pool().name);
          }
        }
      }
      // Any other key cancels with no state change.
      _ => {
        self.confirm = None;
        self.status_msg = "Cancelled.".into();
      }
    }
    Ok(true)
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.standings_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.standings_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.standings_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.standings_cursor = 0;
      }
      _ => {}
    }
    true
  }

  async fn handle_duel_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Decisions
      KeyCode::Char('1') | KeyCode::Left => {
        self.session.record_outcome(Outcome::FirstWon).await;
        self.note_outcome();
      }
      KeyCode::Char('2') | KeyCode::Right => {
        self.session.record_outcome(Outcome::SecondWon).await;
        self.note_outcome();
      }
      KeyCode::Char('d') => {
        self.session.record_outcome(Outcome::Draw).await;
        self.note_outcome();
      }
      KeyCode::Char('s') => {
        self.session.skip();
        self.status_msg = String::new();
      }

      // Working-set pruning (does not touch the persisted store).
      KeyCode::Char('x') => {
        if let Some((first, _)) = self.session.pair() {
          self.session.remove_item(first);
          self.status_msg = "Removed from this session.".into();
        }
      }
      KeyCode::Char('X') => {
        if let Some((_, second)) = self.session.pair() {
          self.session.remove_item(second);
          self.status_msg = "Removed from this session.".into();
        }
      }

      // Panes
      KeyCode::Char('t') => self.mode = Mode::Standings,
      KeyCode::Char('h') => self.mode = Mode::History,

      // Destructive actions, behind confirmation.
      KeyCode::Char('r') => self.confirm = Some(ConfirmAction::Reset),
      KeyCode::Char('D') => self.confirm = Some(ConfirmAction::DeletePool),

      _ => {}
    }
    Ok(true)
  }

  fn handle_standings_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Char('t') => {
        self.mode = Mode::Duel;
        self.filter.clear();
      }
      KeyCode::Char('h') => self.mode = Mode::History,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_standings().len();
        if len > 0 && self.standings_cursor + 1 < len {
          self.standings_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.standings_cursor = self.standings_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.standings_cursor = 0;
      }

      _ => {}
    }
    true
  }

  fn handle_history_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Char('h') => self.mode = Mode::Duel,
      KeyCode::Char('t') => self.mode = Mode::Standings,

      KeyCode::Down | KeyCode::Char('j') => {
        if self.history_scroll + 1 < self.session.history().len() {
          self.history_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.history_scroll = self.history_scroll.saturating_sub(1);
      }

      _ => {}
    }
    true
  }

  /// Refresh the status line after a decision; swallowed persistence
  /// failures surface here.
  fn note_outcome(&mut self) {
    self.status_msg = match self.session.last_error() {
      Some(e) => format!("Error: {e}"),
      None => String::new(),
    };
  }
}
