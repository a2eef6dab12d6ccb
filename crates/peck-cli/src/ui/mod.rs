//! TUI rendering — orchestrates all panes.

pub mod duel;
pub mod history;
pub mod standings;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Mode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);

  match app.mode {
    Mode::Duel => duel::draw(f, rows[1], app),
    Mode::Standings => standings::draw(f, rows[1], app),
    Mode::History => history::draw(f, rows[1], app),
  }

  draw_status(f, rows[2], app);

  if let Some(action) = app.confirm {
    draw_confirm_modal(f, area, action.prompt());
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" peck · {}  [t] standings  [h] history  [q] quit", app.session.pool().name),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.mode {
    Mode::Standings if app.filter_active => (
      "SEARCH",
      "Type to filter  Esc cancel  Enter accept",
    ),
    Mode::Duel => (
      "DUEL",
      "1/2 pick winner  d draw  s skip  x/X drop  r reset  D delete pool",
    ),
    Mode::Standings => (
      "RANKS",
      "↑↓/jk navigate  / search  Esc back  q quit",
    ),
    Mode::History => (
      "HISTORY",
      "↑↓/jk scroll  Esc back  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Confirmation modal ───────────────────────────────────────────────────────

fn draw_confirm_modal(f: &mut Frame, area: Rect, prompt: &str) {
  let width = (prompt.len() as u16 + 6).min(area.width);
  let modal = Rect {
    x:      area.width.saturating_sub(width) / 2,
    y:      area.height / 2,
    width,
    height: 3.min(area.height),
  };

  let block = Block::default()
    .title(" Confirm ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  let inner = block.inner(modal);

  f.render_widget(Clear, modal);
  f.render_widget(block, modal);
  f.render_widget(
    Paragraph::new(Line::from(vec![
      Span::raw(prompt),
      Span::styled("  [y/n]", Style::default().add_modifier(Modifier::BOLD)),
    ])),
    inner,
  );
}
