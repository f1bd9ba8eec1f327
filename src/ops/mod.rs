pub mod board;
pub mod editor;
pub mod selection;
pub mod store;
pub mod view;

pub use board::Board;
pub use selection::Selection;
pub use store::{StoreError, TaskStore};
pub use view::ViewMode;
