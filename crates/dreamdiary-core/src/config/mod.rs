pub mod settings;

pub use settings::{DiaryConfig, Language};
