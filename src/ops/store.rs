use chrono::Utc;

use crate::io::storage::{Storage, StorageError};
use crate::model::task::{Task, TaskField};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The ordered task collection, mirrored to one storage slot.
///
/// Every call that changes the collection writes the whole collection back
/// to the slot before returning.
pub struct TaskStore {
    tasks: Vec<Task>,
    key: String,
    storage: Box<dyn Storage>,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("key", &self.key)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Seed the collection from the slot. An absent slot gives an empty
    /// collection, and so does one that does not parse (it is preserved by the
    /// storage and then overwritten on the next change).
    pub fn load(mut storage: Box<dyn Storage>, key: &str) -> Result<Self, StoreError> {
        let tasks = match storage.read(key)? {
            None => Vec::new(),
            Some(bytes) => match parse_tasks(&bytes) {
                Ok(tasks) => tasks,
                Err(e) => {
                    tracing::warn!(key, error = %e, "discarding malformed task slot");
                    if let Err(e) = storage.preserve(key) {
                        tracing::warn!(key, error = %e, "could not back up malformed task slot");
                    }
                    Vec::new()
                }
            },
        };
        tracing::debug!(key, count = tasks.len(), "loaded tasks");
        Ok(TaskStore {
            tasks,
            key: key.to_string(),
            storage,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Add a task. Names that are empty after trimming are rejected and
    /// `None` is returned. The name itself is stored untrimmed.
    pub fn add(&mut self, name: &str) -> Result<Option<u64>, StoreError> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let id = self.next_id(Utc::now().timestamp_millis());
        self.tasks.push(Task::new(id, name));
        tracing::info!(id, name, "task added");
        self.persist()?;
        Ok(Some(id))
    }

    /// Remove a task by id. Returns false (and writes nothing) if absent.
    pub fn remove(&mut self, id: u64) -> Result<bool, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }
        tracing::info!(id, "task removed");
        self.persist()?;
        Ok(true)
    }

    /// Set one field on the task with the given id, leaving every other task
    /// untouched. Returns false (and writes nothing) if absent.
    pub fn replace_field(&mut self, id: u64, field: TaskField) -> Result<bool, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        tracing::debug!(id, field = field.key(), "field replaced");
        task.apply(field);
        self.persist()?;
        Ok(true)
    }

    /// Id for a task created at `now_ms`: the timestamp, unless that would not
    /// be greater than every existing id. Once the id space is exhausted at the
    /// top, the smallest unused id is taken instead.
    fn next_id(&self, now_ms: i64) -> u64 {
        let now = u64::try_from(now_ms).unwrap_or(0);
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if now <= max => max.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
            _ => now,
        }
    }

    fn lowest_free_id(&self) -> u64 {
        let mut used: Vec<u64> = self.tasks.iter().map(|t| t.id).collect();
        used.sort_unstable();
        let mut candidate = 0;
        for id in used {
            if id != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let text = serialize_tasks(&self.tasks)?;
        self.storage.write(&self.key, &text)?;
        Ok(())
    }
}

/// Parse the slot contents: a JSON array of task objects. Bytes that are
/// not UTF-8 fail like any other malformed slot.
pub fn parse_tasks(bytes: impl AsRef<[u8]>) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_slice(bytes.as_ref())
}

/// Serialize the full collection for the slot
pub fn serialize_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}
