use std::path::Path;

use anyhow::Result;
use dreamdiary_query::TagCloud;

use super::open_store;
use crate::output::format::format_cloud;
use crate::output::OutputFormat;

pub fn run(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = open_store(data_dir)?;
    let cloud = TagCloud::build(store.list());
    print!("{}", format_cloud(&cloud, format));
    Ok(())
}
