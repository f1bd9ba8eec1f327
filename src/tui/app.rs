use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::io::config_io;
use crate::model::{BoardConfig, Task};
use crate::ops::{Board, StoreError, ViewMode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task name
    AddTask,
    /// Editing the selected task's note
    EditNote,
    /// Answering the resource URL prompt
    ResourcePrompt,
    /// Waiting for y/n before deleting the selected task
    ConfirmDelete,
}

/// Text being typed, with a byte-offset cursor on a grapheme boundary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    pub fn with_text(text: &str) -> Self {
        EditBuffer {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the text out, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

/// Main application state
pub struct App {
    pub board: Board,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Cursor into the task list
    pub list_cursor: usize,
    /// Scroll offset for the task list (first visible row)
    pub list_scroll: usize,
    /// Cursor into the selected task's resources
    pub resource_cursor: usize,
    /// Text input shared by the add, note and prompt modes
    pub edit: EditBuffer,
    /// One-shot message for the status row (storage failures and the like)
    pub status_message: Option<String>,
    pub rng: StdRng,
}

impl App {
    pub fn new(board: Board, config: &BoardConfig) -> Self {
        App {
            board,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            show_help: false,
            list_cursor: 0,
            list_scroll: 0,
            resource_cursor: 0,
            edit: EditBuffer::default(),
            status_message: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.board.mode()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.board.selected()
    }

    /// Task under the list cursor
    pub fn cursor_task(&self) -> Option<&Task> {
        self.board.tasks().get(self.list_cursor)
    }

    /// Keep the list cursor inside the collection
    pub fn clamp_list_cursor(&mut self) {
        let len = self.board.tasks().len();
        self.list_cursor = if len == 0 { 0 } else { self.list_cursor.min(len - 1) };
    }

    /// Keep the resource cursor inside the selected task's resources
    pub fn clamp_resource_cursor(&mut self) {
        let len = self.selected_task().map_or(0, |t| t.resources.len());
        self.resource_cursor = if len == 0 { 0 } else { self.resource_cursor.min(len - 1) };
    }

    /// Surface a store failure in the status row
    pub fn report(&mut self, result: Result<bool, StoreError>) -> bool {
        match result {
            Ok(changed) => changed,
            Err(e) => {
                tracing::warn!(error = %e, "could not save tasks");
                self.status_message = Some(format!("save failed: {}", e));
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Open the task under the list cursor
    pub fn open_cursor_task(&mut self) {
        if let Some(id) = self.cursor_task().map(|t| t.id) {
            self.enter_detail(id);
        }
    }

    pub fn pick_random(&mut self) {
        if let Some(id) = self.board.pick_random(&mut self.rng) {
            self.enter_detail(id);
        }
    }

    fn enter_detail(&mut self, id: u64) {
        if self.board.select(id) {
            self.resource_cursor = 0;
            if let Some(idx) = self.board.tasks().iter().position(|t| t.id == id) {
                self.list_cursor = idx;
            }
        }
    }

    pub fn back(&mut self) {
        self.board.back();
        self.mode = Mode::Navigate;
    }

    pub fn start_add_task(&mut self) {
        self.edit = EditBuffer::default();
        self.mode = Mode::AddTask;
    }

    pub fn commit_add_task(&mut self) {
        let name = self.edit.take();
        self.mode = Mode::Navigate;
        let result = self.board.add_task(&name);
        match result {
            Ok(Some(_)) => self.list_cursor = self.board.tasks().len() - 1,
            Ok(None) => {}
            Err(e) => {
                self.report(Err(e));
            }
        }
    }

    pub fn start_edit_note(&mut self) {
        let note = match self.selected_task() {
            Some(task) => task.last_work.clone(),
            None => return,
        };
        self.edit = EditBuffer::with_text(&note);
        self.mode = Mode::EditNote;
    }

    pub fn commit_edit_note(&mut self) {
        let text = self.edit.take();
        self.mode = Mode::Navigate;
        let unchanged = self.selected_task().is_some_and(|t| t.last_work == text);
        if !unchanged {
            let result = self.board.set_note(&text);
            self.report(result);
        }
    }

    pub fn start_resource_prompt(&mut self) {
        if self.selected_task().is_none() {
            return;
        }
        self.edit = EditBuffer::default();
        self.mode = Mode::ResourcePrompt;
    }

    /// `accepted` is false when the prompt was cancelled
    pub fn finish_resource_prompt(&mut self, accepted: bool) {
        let url = self.edit.take();
        self.mode = Mode::Navigate;
        let answer = if accepted { Some(url.as_str()) } else { None };
        let result = self.board.add_resource(answer);
        if self.report(result) {
            let len = self.selected_task().map_or(0, |t| t.resources.len());
            self.resource_cursor = len.saturating_sub(1);
        }
    }

    pub fn remove_cursor_resource(&mut self) {
        let url = match self
            .selected_task()
            .and_then(|t| t.resources.get(self.resource_cursor))
        {
            Some(url) => url.clone(),
            None => return,
        };
        let result = self.board.remove_resource(&url);
        self.report(result);
        self.clamp_resource_cursor();
    }

    pub fn gain_xp(&mut self) {
        let result = self.board.gain_xp();
        self.report(result);
    }

    pub fn request_delete(&mut self) {
        if self.selected_task().is_some() {
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.mode = Mode::Navigate;
        if let Some(id) = self.board.selection().id() {
            let result = self.board.delete_task(id);
            self.report(result);
            self.clamp_list_cursor();
        }
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(data_dir)?;
    let board = Board::open_dir(data_dir, &config.storage.key)?;
    let mut app = App::new(board, &config);
    tracing::info!(dir = %data_dir.display(), tasks = app.board.tasks().len(), "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
