use std::path::Path;

use anyhow::Result;
use clap::Args;
use dreamdiary_query::{DreamFilter, TypeFilter};

use super::open_store;
use crate::output::format::format_dream_list;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive text to look for in content, title and tags
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// all, lucid or normal
    #[arg(long = "type", default_value = "all")]
    pub kind: TypeFilter,

    /// Only dreams carrying this tag (repeat to require several)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Maximum number of entries
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

pub fn run(args: &ListArgs, data_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(data_dir)?;

    let filter = DreamFilter::new()
        .search(args.search.clone())
        .kind(args.kind)
        .tags(args.tags.iter().cloned());
    let mut dreams = filter.apply(store.list());

    if let Some(limit) = args.limit {
        dreams.truncate(limit);
    }

    if dreams.is_empty() && filter.is_active() && !store.is_empty() {
        eprintln!("No dreams match the current filters.");
        return Ok(());
    }

    print!("{}", format_dream_list(&dreams, format));
    Ok(())
}
