pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use config::{DiaryConfig, Language};
pub use error::CoreError;
pub use model::{DreamDraft, DreamEntry, DreamId, DreamPatch, Mood, Permissions, Role};
pub use storage::{DreamStore, FileStore, KeyValueStore, MemoryStore};
