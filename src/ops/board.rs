use std::path::Path;

use rand::Rng;

use crate::io::storage::{FileStorage, Storage};
use crate::model::task::{Task, TaskField};
use crate::ops::editor;
use crate::ops::selection::Selection;
use crate::ops::store::{StoreError, TaskStore};
use crate::ops::view::ViewMode;

/// One board session: the task store plus the current selection.
///
/// Collection changes are persisted by the store; selection changes are
/// session-only and never write.
#[derive(Debug)]
pub struct Board {
    store: TaskStore,
    selection: Selection,
}

impl Board {
    /// Open a board from a storage slot. Nothing is selected at startup.
    pub fn open(storage: Box<dyn Storage>, key: &str) -> Result<Self, StoreError> {
        Ok(Board {
            store: TaskStore::load(storage, key)?,
            selection: Selection::none(),
        })
    }

    /// Open the file-backed board in a data directory
    pub fn open_dir(data_dir: &Path, key: &str) -> Result<Self, StoreError> {
        Self::open(Box::new(FileStorage::new(data_dir)), key)
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> ViewMode {
        ViewMode::of(&self.selection)
    }

    /// The selected task, resolved from the store
    pub fn selected(&self) -> Option<&Task> {
        self.selection.id().and_then(|id| self.store.get(id))
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, name: &str) -> Result<Option<u64>, StoreError> {
        self.store.add(name)
    }

    /// Delete a task; clears the selection if it pointed at it
    pub fn delete_task(&mut self, id: u64) -> Result<bool, StoreError> {
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        self.store.remove(id)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Focus a task. Ids not in the store are ignored.
    pub fn select(&mut self, id: u64) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selection.select(id);
        tracing::debug!(id, "task selected");
        true
    }

    /// Back to the list
    pub fn back(&mut self) {
        self.selection.clear();
    }

    pub fn pick_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u64> {
        let picked = self.selection.pick_random(self.store.tasks(), rng);
        if let Some(id) = picked {
            tracing::debug!(id, "random task picked");
        }
        picked
    }

    // -----------------------------------------------------------------------
    // Editor (acts on the selected task; no-op without one)
    // -----------------------------------------------------------------------

    pub fn set_note(&mut self, text: &str) -> Result<bool, StoreError> {
        self.edit_selected(|_| Some(editor::set_note(text)))
    }

    /// `url` is the prompt answer; `None` means the prompt was cancelled
    pub fn add_resource(&mut self, url: Option<&str>) -> Result<bool, StoreError> {
        self.edit_selected(|task| editor::add_resource(task, url))
    }

    pub fn remove_resource(&mut self, url: &str) -> Result<bool, StoreError> {
        self.edit_selected(|task| Some(editor::remove_resource(task, url)))
    }

    pub fn gain_xp(&mut self) -> Result<bool, StoreError> {
        self.edit_selected(|task| Some(editor::gain_xp(task)))
    }

    /// Several gains with a single write
    pub fn gain_xp_times(&mut self, times: u32) -> Result<bool, StoreError> {
        if times == 0 {
            return Ok(false);
        }
        self.edit_selected(|task| Some(editor::gain_xp_times(task, times)))
    }

    /// Compute the new field from the store's current copy of the selected
    /// task and write it back through the store.
    fn edit_selected<F>(&mut self, edit: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&Task) -> Option<TaskField>,
    {
        let Some(task) = self.selected() else {
            return Ok(false);
        };
        let id = task.id;
        match edit(task) {
            Some(field) => self.store.replace_field(id, field),
            None => Ok(false),
        }
    }
}
