use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use dreamdiary_core::error::CoreError;

use super::open_store;

#[derive(Args)]
pub struct DeleteArgs {
    /// Dream ID (full or prefix)
    pub id: String,
}

pub fn run(args: &DeleteArgs, data_dir: &Path) -> Result<()> {
    let mut store = open_store(data_dir)?;

    let id = match store.resolve(&args.id) {
        Ok(entry) => entry.id.clone(),
        Err(CoreError::NotFound { .. }) => {
            tracing::info!("No dream matches '{}'", args.id);
            eprintln!("No dream matches '{}'; nothing deleted.", args.id);
            return Ok(());
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to resolve dream '{}'", args.id)),
    };

    match store.delete(id.as_str()).context("Failed to delete dream")? {
        Some(removed) => eprintln!("Deleted dream {}.", removed.id.short()),
        None => {
            tracing::info!("Dream {id} vanished before it could be deleted");
            eprintln!("No dream matches '{}'; nothing deleted.", args.id);
        }
    }
    Ok(())
}
