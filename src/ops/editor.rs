//! New field values for the editor actions.
//!
//! Each function takes the current state of a task and returns the
//! [`TaskField`] to hand to the store, or `None` when the action is a no-op.

use crate::model::task::{Task, TaskField, XP_STEP};

/// Note text is stored verbatim, whitespace included
pub fn set_note(text: &str) -> TaskField {
    TaskField::LastWork(text.to_string())
}

/// Append a resource. A cancelled prompt (`None`) or an empty answer adds
/// nothing.
pub fn add_resource(task: &Task, url: Option<&str>) -> Option<TaskField> {
    let url = url.filter(|u| !u.is_empty())?;
    let mut resources = task.resources.clone();
    resources.push(url.to_string());
    Some(TaskField::Resources(resources))
}

/// Remove every resource equal to `url`, not just the first
pub fn remove_resource(task: &Task, url: &str) -> TaskField {
    let resources = task
        .resources
        .iter()
        .filter(|r| r.as_str() != url)
        .cloned()
        .collect();
    TaskField::Resources(resources)
}

pub fn gain_xp(task: &Task) -> TaskField {
    gain_xp_times(task, 1)
}

/// `times` gains folded into one field change
pub fn gain_xp_times(task: &Task, times: u32) -> TaskField {
    TaskField::Xp(task.xp.saturating_add(XP_STEP.saturating_mul(u64::from(times))))
}
