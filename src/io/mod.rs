pub mod config_io;
pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
