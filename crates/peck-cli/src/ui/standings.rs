//! The ranking table pane.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Row, Table},
};

use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.filter.is_empty() {
    " Standings ".to_string()
  } else {
    format!(" Standings — /{} ", app.filter)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let rows: Vec<Row> = app
    .filtered_standings()
    .iter()
    .enumerate()
    .map(|(rank, item)| {
      let last = item
        .last_compared
        .map(|d| d.to_string())
        .unwrap_or_else(|| "—".to_string());
      let style = if rank == app.standings_cursor {
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      Row::new(vec![
        format!("{}", rank + 1),
        item.display_name.clone(),
        format!("{:.0}", item.rating),
        format!("{}", item.games_played),
        last,
      ])
      .style(style)
    })
    .collect();

  let table = Table::new(
    rows,
    [
      Constraint::Length(4),
      Constraint::Min(20),
      Constraint::Length(8),
      Constraint::Length(8),
      Constraint::Length(12),
    ],
  )
  .header(
    Row::new(vec!["#", "note", "rating", "games", "last"])
      .style(Style::default().fg(Color::DarkGray)),
  )
  .block(block);

  f.render_widget(table, area);
}
