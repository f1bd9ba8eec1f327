use rand::Rng;

use crate::model::task::Task;

/// The focused task, held by id only. The task itself is always resolved
/// from the store so the detail view can never show a stale copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection(Option<u64>);

impl Selection {
    pub fn none() -> Self {
        Selection(None)
    }

    pub fn id(&self) -> Option<u64> {
        self.0
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.0 == Some(id)
    }

    pub fn select(&mut self, id: u64) {
        self.0 = Some(id);
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Select a uniformly random task. Leaves the selection alone when there
    /// is nothing to pick from.
    pub fn pick_random<R: Rng + ?Sized>(&mut self, tasks: &[Task], rng: &mut R) -> Option<u64> {
        if tasks.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..tasks.len());
        let id = tasks[index].id;
        self.select(id);
        Some(id)
    }
}
