pub mod detail_view;
pub mod help_overlay;
pub mod list_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use crate::ops::ViewMode;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (title + separator) | content | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    match app.view() {
        ViewMode::List => list_view::render_list_view(frame, app, chunks[1]),
        ViewMode::Detail(_) => detail_view::render_detail_view(frame, app, chunks[1]),
    }

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let subtitle = match app.view() {
        ViewMode::List => {
            let n = app.board.tasks().len();
            format!("{} task{}", n, if n == 1 { "" } else { "s" })
        }
        ViewMode::Detail(_) => "task detail".to_string(),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" questboard", title_style),
            Span::styled(format!("  {}", subtitle), dim_style),
        ]),
        Line::from(Span::styled(
            "\u{2500}".repeat(area.width as usize),
            dim_style,
        )),
    ];
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
