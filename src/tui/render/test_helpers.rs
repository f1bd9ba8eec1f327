use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStorage;
use crate::model::BoardConfig;
use crate::ops::Board;
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 20;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the default test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An App over an in-memory board holding the named tasks, with a seeded rng
pub fn app_with_tasks(names: &[&str]) -> App {
    let mut board = Board::open(Box::new(MemoryStorage::new()), "tasks").unwrap();
    for name in names {
        board.add_task(name).unwrap();
    }
    let mut app = App::new(board, &BoardConfig::default());
    app.rng = StdRng::seed_from_u64(7);
    app
}

/// An App in detail mode for the first task
pub fn app_in_detail(names: &[&str]) -> App {
    let mut app = app_with_tasks(names);
    app.open_cursor_task();
    app
}
