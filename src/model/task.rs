use serde::{Deserialize, Serialize};

/// XP awarded by a single "gain" action
pub const XP_STEP: u64 = 10;

/// One trackable unit of work.
///
/// Field names on disk follow the storage slot layout
/// (`{id, name, lastWork, resources, xp}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    /// Free-text "last worked on" note
    #[serde(default)]
    pub last_work: String,
    /// Resource URLs in insertion order (duplicates allowed)
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub xp: u64,
}

impl Task {
    /// A fresh task: empty note, no resources, zero XP
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Task {
            id,
            name: name.into(),
            last_work: String::new(),
            resources: Vec::new(),
            xp: 0,
        }
    }

    /// Progress bar fill in percent. The bar wraps every 100 XP.
    pub fn xp_progress(&self) -> u64 {
        self.xp % 100
    }

    /// Overwrite one mutable field
    pub fn apply(&mut self, field: TaskField) {
        match field {
            TaskField::LastWork(text) => self.last_work = text,
            TaskField::Resources(resources) => self.resources = resources,
            TaskField::Xp(xp) => self.xp = xp,
        }
    }
}

/// A replaceable task field together with its new value.
///
/// `id` and `name` are fixed at creation and have no variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskField {
    LastWork(String),
    Resources(Vec<String>),
    Xp(u64),
}

impl TaskField {
    /// The storage name of the field
    pub fn key(&self) -> &'static str {
        match self {
            TaskField::LastWork(_) => "lastWork",
            TaskField::Resources(_) => "resources",
            TaskField::Xp(_) => "xp",
        }
    }
}
