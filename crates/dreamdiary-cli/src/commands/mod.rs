pub mod add;
pub mod cloud;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod roles;
pub mod show;
pub mod stats;
pub mod tags;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use dreamdiary_core::storage::{DreamStore, FileStore};

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new dream
    Add(add::AddArgs),
    /// List dreams (most recent first), optionally filtered
    List(list::ListArgs),
    /// Show a single dream
    Show(show::ShowArgs),
    /// Change fields of an existing dream
    Edit(edit::EditArgs),
    /// Delete a dream
    Delete(delete::DeleteArgs),
    /// List every tag with the number of dreams using it
    Tags,
    /// Show aggregate statistics across all dreams
    Stats,
    /// Show the tag cloud
    Cloud,
    /// Show the role permission table
    Roles(roles::RolesArgs),
    /// Read or change diary settings
    Config(config::ConfigArgs),
}

/// Open the diary stored under `data_dir`, creating the directory on first use.
pub fn open_store(data_dir: &Path) -> Result<DreamStore<FileStore>> {
    tracing::debug!("Opening diary at {}", data_dir.display());
    let backend = FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    DreamStore::open(backend).context("Failed to load dreams")
}
