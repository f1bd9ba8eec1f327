use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

/// Render the task list content area
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.board.tasks().is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " No tasks yet. Press a to add one.",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    // Keep the cursor in range and on screen
    app.clamp_list_cursor();
    let visible_height = area.height as usize;
    if app.list_cursor < app.list_scroll {
        app.list_scroll = app.list_cursor;
    } else if visible_height > 0 && app.list_cursor >= app.list_scroll + visible_height {
        app.list_scroll = app.list_cursor + 1 - visible_height;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (idx, task) in app
        .board
        .tasks()
        .iter()
        .enumerate()
        .skip(app.list_scroll)
        .take(visible_height)
    {
        let is_cursor = idx == app.list_cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let marker = if is_cursor { " \u{25B8} " } else { "   " };
        let xp = format!(" {} xp ", task.xp);
        let name_budget = width.saturating_sub(display_width(marker) + display_width(&xp));
        let name = pad_to_width(&truncate_to_width(&task.name, name_budget), name_budget);

        let name_style = if is_cursor {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(row_bg)),
            Span::styled(name, name_style),
            Span::styled(xp, Style::default().fg(app.theme.green).bg(row_bg)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
