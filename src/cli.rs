use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "collection-report")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Creates a storage report from the contents of an iconik collection",
    long_about = "Walks every asset and sub-collection below an iconik collection and \
                  reports asset counts by media type, total runtime, storage used per \
                  storage and format counts.\n\n\
                  Without an App ID and token (flags, environment or config file) you are \
                  prompted for your iconik username and password."
)]
pub struct Cli {
    /// iconik App ID
    #[arg(short, long, env = "ICONIK_APP_ID")]
    pub app_id: Option<String>,

    /// iconik App token
    #[arg(short, long, env = "ICONIK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// URL for the iconik domain [default: https://app.iconik.io/]
    #[arg(short = 'i', long = "iconik-host", env = "ICONIK_HOST")]
    pub host: Option<String>,

    /// Collection ID to run the report on
    #[arg(short, long)]
    pub collection_id: String,

    /// Local path to store the report (reserved, currently unused)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Search page size [default: 150]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,

    /// Give up if the search has not finished after this many pages [default: 10000]
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
