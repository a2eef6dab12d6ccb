//! The comparison pane — two cards and a verdict row.

use peck_core::item::Item;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let pair = app.session.pair();
  let items = app.session.items();

  // Degenerate pair: nothing to compare.
  let Some((first, second)) = pair.filter(|(a, b)| a != b) else {
    draw_empty(f, area, items.len());
    return;
  };

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage(47),
      Constraint::Percentage(6),
      Constraint::Percentage(47),
    ])
    .split(area);

  draw_card(f, cols[0], &items[first], '1');
  draw_vs(f, cols[1]);
  draw_card(f, cols[2], &items[second], '2');
}

fn draw_card(f: &mut Frame, area: Rect, item: &Item, key: char) {
  let block = Block::default()
    .title(format!(" [{key}] "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let last = item
    .last_compared
    .map(|d| d.to_string())
    .unwrap_or_else(|| "never".to_string());

  let lines = vec![
    Line::from(""),
    Line::from(Span::styled(
      item.display_name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center),
    Line::from(""),
    Line::from(Span::styled(
      format!("rating {:.0}", item.rating),
      Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center),
    Line::from(Span::styled(
      format!("{} comparisons · last {last}", item.games_played),
      Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center),
    Line::from(""),
    Line::from(Span::styled(
      item.id.clone(),
      Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_vs(f: &mut Frame, area: Rect) {
  let middle = area.height / 2;
  let mut lines = vec![Line::from(""); middle as usize];
  lines.push(
    Line::from(Span::styled(
      "vs",
      Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center),
  );
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_empty(f: &mut Frame, area: Rect, item_count: usize) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let message = match item_count {
    0 => "No comparable notes found — check the pool's folder and rating property.",
    _ => "Need at least two comparable notes to run a duel.",
  };
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      message,
      Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center),
    inner,
  );
}
