use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use dreamdiary_core::model::{parse_tags, DreamPatch, Mood};

use super::open_store;
use crate::output::format::format_dream_full;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct EditArgs {
    /// Dream ID (full or prefix)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    /// Mark the dream as lucid
    #[arg(long, conflicts_with = "normal")]
    pub lucid: bool,

    /// Mark the dream as not lucid
    #[arg(long)]
    pub normal: bool,

    #[arg(long)]
    pub mood: Option<Mood>,

    /// Comma-separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl EditArgs {
    fn to_patch(&self) -> DreamPatch {
        let is_lucid = match (self.lucid, self.normal) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        DreamPatch {
            title: self.title.clone(),
            content: self.content.clone(),
            is_lucid,
            mood: self.mood,
            tags: self.tags.as_deref().map(parse_tags),
            date: self.date,
        }
    }
}

pub fn run(args: &EditArgs, data_dir: &Path, format: OutputFormat) -> Result<()> {
    let patch = args.to_patch();
    if patch.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one field, e.g. --mood happy.");
    }

    let mut store = open_store(data_dir)?;
    let id = store
        .resolve(&args.id)
        .with_context(|| format!("Failed to resolve dream '{}'", args.id))?
        .id
        .clone();

    match store
        .update(id.as_str(), &patch)
        .context("Failed to update dream")?
    {
        Some(entry) => match format {
            OutputFormat::Json => println!("{}", format_dream_full(&entry, format)),
            OutputFormat::Text => eprintln!("Dream {} updated.", entry.id.short()),
        },
        None => {
            tracing::info!("Dream {id} vanished before it could be updated");
            eprintln!("Dream {id} no longer exists; nothing changed.");
        }
    }
    Ok(())
}
