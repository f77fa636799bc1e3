use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use super::open_store;
use crate::output::format::format_dream_full;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ShowArgs {
    /// Dream ID (full or prefix)
    pub id: String,
}

pub fn run(args: &ShowArgs, data_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(data_dir)?;
    let entry = store
        .resolve(&args.id)
        .with_context(|| format!("Failed to resolve dream '{}'", args.id))?;
    println!("{}", format_dream_full(entry, format));
    Ok(())
}
