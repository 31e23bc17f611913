mod cli;
mod config;
mod credentials;
mod paths;
mod report;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::{FileConfig, Settings};
use iconik::Client;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let settings = Settings::resolve(&cli, FileConfig::load()?);

    if let Some(dir) = &settings.output_dir {
        log::warn!(
            "--output-dir {} is not used yet, the report is printed to stdout",
            dir.display()
        );
    }

    let credentials = credentials::provider(&settings).credentials()?;
    let client = Client::new(&settings.host, credentials);

    report::run(&client, &settings.collection_id, &settings.walk, cli.quiet).inspect_err(|e| {
        if let Some(api_err) = e.downcast_ref::<iconik::Error>() {
            let category = api_err.category();
            ui::error(&format!("{}: {}", category, category.advice()));
        }
    })
}
