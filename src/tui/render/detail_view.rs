use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::model::Task;
use crate::tui::app::{App, Mode};
use crate::tui::theme::Theme;

/// Cursor glyph drawn at the insertion point while editing
const EDIT_CURSOR: &str = "\u{258C}";

/// Render the detail view for the selected task
pub fn render_detail_view(frame: &mut Frame, app: &mut App, area: Rect) {
    app.clamp_resource_cursor();
    let bg = app.theme.background;

    let Some(task) = app.selected_task() else {
        let empty = Paragraph::new(" Task not found")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    };

    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    // Name and XP
    lines.push(Line::from(Span::styled(
        format!(" {}", task.name),
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled(" XP: ", dim_style),
        Span::styled(
            task.xp.to_string(),
            Style::default().fg(app.theme.green).bg(bg),
        ),
    ]));
    lines.push(xp_bar_line(task, &app.theme, area.width.saturating_sub(2)));
    lines.push(Line::from(""));

    // Note
    lines.push(Line::from(Span::styled(" Last worked on", header_style)));
    if app.mode == Mode::EditNote {
        let (before, after) = app.edit.text.split_at(app.edit.cursor);
        let cursor_style = Style::default().fg(app.theme.highlight).bg(bg);
        let edited = format!("{}{}{}", before, EDIT_CURSOR, after);
        for line in edited.split('\n') {
            // Style the cursor glyph separately
            match line.split_once(EDIT_CURSOR) {
                Some((l, r)) => lines.push(Line::from(vec![
                    Span::styled(format!("   {}", l), text_style),
                    Span::styled(EDIT_CURSOR, cursor_style),
                    Span::styled(r.to_string(), text_style),
                ])),
                None => lines.push(Line::from(Span::styled(format!("   {}", line), text_style))),
            }
        }
    } else if task.last_work.is_empty() {
        lines.push(Line::from(Span::styled("   (nothing yet)", dim_style)));
    } else {
        for line in task.last_work.split('\n') {
            lines.push(Line::from(Span::styled(format!("   {}", line), text_style)));
        }
    }
    lines.push(Line::from(""));

    // Resources
    lines.push(Line::from(Span::styled(" Resources", header_style)));
    if task.resources.is_empty() {
        lines.push(Line::from(Span::styled("   (none)", dim_style)));
    }
    for (i, url) in task.resources.iter().enumerate() {
        let is_cursor = i == app.resource_cursor && app.mode == Mode::Navigate;
        let (marker, style) = if is_cursor {
            (
                " \u{25B8} ",
                Style::default()
                    .fg(app.theme.text_bright)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::UNDERLINED),
            )
        } else {
            ("   ", text_style.add_modifier(Modifier::UNDERLINED))
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
            Span::styled(url.clone(), style),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Progress bar filled to `xp % 100` percent of `width` cells
fn xp_bar_line(task: &Task, theme: &Theme, width: u16) -> Line<'static> {
    let width = width as usize;
    let filled = task.xp_progress() as usize * width / 100;
    Line::from(vec![
        Span::styled(" ", Style::default().bg(theme.background)),
        Span::styled(
            "\u{2588}".repeat(filled),
            Style::default().fg(theme.xp_bar).bg(theme.background),
        ),
        Span::styled(
            "\u{2591}".repeat(width - filled),
            Style::default().fg(theme.xp_bar_bg).bg(theme.background),
        ),
    ])
}
