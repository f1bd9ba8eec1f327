use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::ViewMode;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let bright = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg));

    // Failures win over everything else
    if let Some(ref msg) = app.status_message {
        let line = Line::from(Span::styled(
            format!(" {}", truncate_to_width(msg, width.saturating_sub(1))),
            Style::default().fg(app.theme.red).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
        return;
    }

    let line = match app.mode {
        Mode::Navigate => {
            if app.show_key_hints {
                let hint = match app.view() {
                    ViewMode::List => "a add  r random  Enter open  ? help  q quit",
                    ViewMode::Detail(_) => "x xp  e note  u url  D delete  b back",
                };
                with_hint(Vec::new(), hint, dim, width)
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
        Mode::AddTask => with_hint(
            vec![
                Span::styled(" New task: ", dim),
                Span::styled(app.edit.text.clone(), bright),
                cursor,
            ],
            "Enter add  Esc cancel",
            dim,
            width,
        ),
        Mode::ResourcePrompt => with_hint(
            vec![
                Span::styled(" Resource URL: ", dim),
                Span::styled(app.edit.text.clone(), bright),
                cursor,
            ],
            "Enter add  Esc cancel",
            dim,
            width,
        ),
        Mode::EditNote => with_hint(
            vec![Span::styled(" Editing note", bright)],
            "Esc done",
            dim,
            width,
        ),
        Mode::ConfirmDelete => {
            let name = app.selected_task().map(|t| t.name.as_str()).unwrap_or("");
            Line::from(vec![
                Span::styled(" Delete \"", Style::default().fg(app.theme.red).bg(bg)),
                Span::styled(truncate_to_width(name, width / 2), bright),
                Span::styled("\"? ", Style::default().fg(app.theme.red).bg(bg)),
                Span::styled("y/n", dim),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Append `hint` right-aligned after `spans` when it fits
fn with_hint<'a>(
    mut spans: Vec<Span<'a>>,
    hint: &'a str,
    hint_style: Style,
    width: usize,
) -> Line<'a> {
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), hint_style));
        spans.push(Span::styled(hint, hint_style));
    }
    Line::from(spans)
}
