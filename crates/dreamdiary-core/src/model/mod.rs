pub mod dream;
pub mod role;

pub use dream::{parse_tags, DreamDraft, DreamEntry, DreamId, DreamPatch, Mood};
pub use role::{Permissions, Role};
