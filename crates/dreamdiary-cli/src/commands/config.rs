use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dreamdiary_core::config::{DiaryConfig, Language};
use dreamdiary_core::storage::FileStore;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print current settings
    Get,
    /// Set the interface language (es or en)
    SetLanguage { language: Language },
}

pub fn run(args: &ConfigArgs, data_dir: &Path) -> Result<()> {
    let mut store = FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let mut config = DiaryConfig::load(&store).context("Failed to read settings")?;

    match &args.action {
        ConfigAction::Get => {
            println!("language = {}", config.language);
        }
        ConfigAction::SetLanguage { language } => {
            config.language = *language;
            config.save(&mut store).context("Failed to save settings")?;
            println!("language = {}", config.language);
        }
    }
    Ok(())
}
