use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::ViewMode;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay intercepts everything; ? or Esc closes it
    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        _ => {}
    }

    match app.view() {
        ViewMode::List => handle_list_key(app, key),
        ViewMode::Detail(_) => handle_detail_key(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.board.tasks().len();
            if app.list_cursor + 1 < len {
                app.list_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.list_cursor = app.list_cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.list_cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.list_cursor = app.board.tasks().len().saturating_sub(1);
        }
        KeyCode::Enter => app.open_cursor_task(),
        KeyCode::Char('r') => app.pick_random(),
        KeyCode::Char('a') => app.start_add_task(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => app.back(),
        KeyCode::Char('x') => app.gain_xp(),
        KeyCode::Char('e') => app.start_edit_note(),
        KeyCode::Char('u') => app.start_resource_prompt(),
        KeyCode::Char('d') => app.remove_cursor_resource(),
        KeyCode::Char('D') => app.request_delete(),
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.selected_task().map_or(0, |t| t.resources.len());
            if app.resource_cursor + 1 < len {
                app.resource_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.resource_cursor = app.resource_cursor.saturating_sub(1);
        }
        _ => {}
    }
}
