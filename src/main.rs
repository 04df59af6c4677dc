//! revfeed - Entry Point

use clap::Parser;
use revfeed::config::{self, CliOverrides};
use revfeed::image::DEFAULT_IMAGE_CACHE_CAPACITY;
use revfeed::source::FileFetcher;
use revfeed::view::{self, ColorConfig, ViewOptions};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// revfeed - scroll a paged review feed in the terminal
#[derive(Parser, Debug)]
#[command(name = "revfeed")]
#[command(version)]
#[command(about = "Browse a JSON review feed page by page in the terminal")]
pub struct Args {
    /// Path to a JSON review document (`{"count": N, "items": [...]}`)
    pub file: PathBuf,

    /// Reviews requested per page
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Simulated latency of each page fetch in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// Body lines shown before "show more" (0 disables truncation)
    #[arg(short, long)]
    pub lines: Option<u32>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            page_size: self.page_size.map(|n| n as usize),
            fetch_latency_ms: self.latency_ms,
            truncation_lines: self.lines.map(|n| n as usize),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = config::resolve(args.config.clone(), &args.cli_overrides())?;

    let fetcher = FileFetcher::new(&args.file)?
        .with_latency(Duration::from_millis(config.fetch_latency_ms));

    revfeed::logging::init(&config.log_file_path)?;
    info!(config = ?config, file = %args.file.display(), "Configuration loaded and resolved");

    let options = ViewOptions {
        page_size: config.page_size,
        prefetch_screens: config.prefetch_screens,
        truncation_lines: u32::try_from(config.truncation_lines).unwrap_or(u32::MAX),
        image_cache_capacity: NonZeroUsize::new(config.image_cache_capacity)
            .unwrap_or(DEFAULT_IMAGE_CACHE_CAPACITY),
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    view::run_with_fetcher(Arc::new(fetcher), options)?;

    Ok(())
}
