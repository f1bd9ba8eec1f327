//! questboard: a task board where every task earns XP.
//!
//! The board keeps an ordered list of tasks in one storage slot, tracks which
//! task is focused, and edits the focused task's note, resource links and XP.
//! The `qb` binary puts a terminal UI and a scriptable CLI on top.

pub mod cli;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod tui;
pub mod util;
