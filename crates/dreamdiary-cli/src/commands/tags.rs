use std::path::Path;

use anyhow::Result;
use dreamdiary_query::tag_catalog;

use super::open_store;
use crate::output::format::format_catalog;
use crate::output::OutputFormat;

pub fn run(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(data_dir)?;
    let catalog = tag_catalog(store.list());
    print!("{}", format_catalog(&catalog, format));
    Ok(())
}
