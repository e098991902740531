// Utils compartidos

pub mod constants;
pub mod storage;

pub use constants::*;
pub use storage::{default_backend, BrowserStorage, MemoryStorage, StorageBackend};
