pub mod dream_store;
pub mod kv;
pub mod snapshot;

pub use dream_store::DreamStore;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
