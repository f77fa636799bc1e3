use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "dreamdiary",
    version,
    about = "Record, browse and summarize your dreams"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: output::OutputFormat,

    /// Directory holding the diary's data files
    #[arg(long, global = true, env = "DREAMDIARY_DIR", default_value = ".dreamdiary")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: commands::Commands,
}

/// Crates whose logs `-v` raises; everything else stays at `warn`.
const LOG_TARGETS: [&str; 3] = ["dreamdiary", "dreamdiary_core", "dreamdiary_query"];

fn log_directives(verbose: u8) -> Option<String> {
    let level = match verbose {
        0 => return None,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(LOG_TARGETS.iter().map(|target| format!("{target}={level}")));
    Some(directives.join(","))
}

fn init_tracing(verbose: u8) {
    let filter = match log_directives(verbose) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dir = cli.data_dir.as_path();
    match &cli.command {
        commands::Commands::Add(args) => commands::add::run(args, dir, cli.format),
        commands::Commands::List(args) => commands::list::run(args, dir, cli.format),
        commands::Commands::Show(args) => commands::show::run(args, dir, cli.format),
        commands::Commands::Edit(args) => commands::edit::run(args, dir, cli.format),
        commands::Commands::Delete(args) => commands::delete::run(args, dir),
        commands::Commands::Tags => commands::tags::run(dir, cli.format),
        commands::Commands::Stats => commands::stats::run(dir, cli.format),
        commands::Commands::Cloud => commands::cloud::run(dir, cli.format),
        commands::Commands::Roles(args) => commands::roles::run(args, cli.format),
        commands::Commands::Config(args) => commands::config::run(args, dir),
    }
}
