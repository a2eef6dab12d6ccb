//! The reconstructed win/loss log, most recent first.

use chrono::DateTime;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" History ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let entries = app.session.history();
  if entries.is_empty() {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        "No comparisons recorded yet.",
        Style::default().fg(Color::DarkGray),
      ))),
      inner,
    );
    return;
  }

  let lines: Vec<Line> = entries
    .iter()
    .skip(app.history_scroll)
    .take(inner.height as usize)
    .map(|entry| {
      let when = DateTime::from_timestamp_millis(entry.timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "????-??-??".to_string());

      Line::from(vec![
        Span::styled(format!("{when}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(
          entry.winner.clone(),
          Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!(" {:.0}→{:.0}", entry.winner_old, entry.winner_new),
          Style::default().fg(Color::Green),
        ),
        Span::raw("  beat  "),
        Span::styled(entry.loser.clone(), Style::default().fg(Color::Red)),
        Span::styled(
          format!(" {:.0}→{:.0}", entry.loser_old, entry.loser_new),
          Style::default().fg(Color::Red),
        ),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
