use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Text entry shared by the add-task line, the note editor and the resource
/// prompt. Only the note editor accepts newlines; Enter confirms the others.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => match app.mode {
            Mode::EditNote => app.edit.insert_char('\n'),
            Mode::AddTask => app.commit_add_task(),
            Mode::ResourcePrompt => app.finish_resource_prompt(true),
            _ => {}
        },
        KeyCode::Esc => match app.mode {
            // Leaving the note editor keeps what was typed
            Mode::EditNote => app.commit_edit_note(),
            Mode::ResourcePrompt => app.finish_resource_prompt(false),
            _ => {
                app.edit.take();
                app.mode = Mode::Navigate;
            }
        },
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.edit.insert_char(c)
        }
        KeyCode::Tab if app.mode == Mode::EditNote => app.edit.insert_char('\t'),
        KeyCode::Backspace => app.edit.backspace(),
        KeyCode::Delete => app.edit.delete(),
        KeyCode::Left => app.edit.left(),
        KeyCode::Right => app.edit.right(),
        KeyCode::Home => app.edit.home(),
        KeyCode::End => app.edit.end(),
        _ => {}
    }
}
