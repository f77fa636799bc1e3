use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use dreamdiary_core::model::{parse_tags, DreamDraft, Mood};

use super::open_store;
use crate::output::format::format_dream_full;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct AddArgs {
    /// What happened in the dream
    pub content: String,

    /// Optional title
    #[arg(long)]
    pub title: Option<String>,

    /// Mark the dream as lucid
    #[arg(long)]
    pub lucid: bool,

    /// happy, neutral, sad, excited, scared or confused
    #[arg(long, default_value = "neutral")]
    pub mood: Mood,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Night of the dream (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run(args: &AddArgs, data_dir: &Path, format: OutputFormat) -> Result<()> {
    let mut store = open_store(data_dir)?;

    let mut draft = DreamDraft::new(args.content.clone())
        .lucid(args.lucid)
        .mood(args.mood)
        .tags(parse_tags(&args.tags));
    draft.title = args.title.clone();
    draft.date = args.date;

    let entry = store.create(draft).context("Failed to record dream")?;

    match format {
        OutputFormat::Json => println!("{}", format_dream_full(&entry, format)),
        OutputFormat::Text => {
            eprintln!("Dream {} recorded.", entry.id.short());
            eprintln!("View with: dreamdiary show {}", entry.id.short());
        }
    }
    Ok(())
}
