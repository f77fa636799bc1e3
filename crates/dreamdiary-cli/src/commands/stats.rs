use std::path::Path;

use anyhow::{Context, Result};
use dreamdiary_query::StatsCache;

use super::open_store;
use crate::output::format::format_stats;
use crate::output::OutputFormat;

pub fn run(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(data_dir)?;

    if store.is_empty() && matches!(format, OutputFormat::Text) {
        println!("No statistics yet. Record some dreams first.");
        return Ok(());
    }

    let mut cache = StatsCache::new();
    let stats = cache
        .for_store(&store)
        .context("Failed to compute statistics")?;
    tracing::debug!("Statistics over {} dreams", stats.total_count);
    print!("{}", format_stats(stats, format));
    Ok(())
}
