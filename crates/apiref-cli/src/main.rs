//! apiref — fold a fresh API reference scrape into the curated docs tree.
//!
//! Run after the OpenAPI scraper has written its pages to the scratch
//! directory. Without flags the defaults (`tmp` into `reference/api`) or the
//! local `apiref.toml` are used.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use apiref_core::config::DEFAULT_CONFIG_FILE;
use apiref_core::ReconcileConfig;
use apiref_vault::{reconcile, Console, Outcome};

#[derive(Parser)]
#[command(name = "apiref")]
#[command(version)]
#[command(about = "Reconcile scraped API reference pages with the curated docs tree")]
struct Cli {
    /// Config file [default: ./apiref.toml when present]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the freshly scraped pages
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Curated reference directory
    #[arg(long, value_name = "DIR")]
    target_dir: Option<PathBuf>,

    /// Extra page to never prune, relative to the target directory
    #[arg(long, value_name = "PATH")]
    protect: Vec<PathBuf>,

    /// More log output on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Failures are reported on stdout next to the transcript; the exit
    // status stays zero.
    if let Err(err) = run(cli) {
        println!("{err:#}");
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;
    tracing::debug!(?config, "resolved config");

    let mut console = Console::stdio();
    match reconcile(&config, &mut console)? {
        Outcome::Completed(summary) => tracing::info!(
            duplicates = summary.duplicates,
            removed = summary.removed.len(),
            renamed = summary.renamed.len(),
            "reconciled"
        ),
        Outcome::Declined { unmatched } => {
            tracing::info!(unmatched = unmatched.len(), "stopped by operator")
        }
    }
    Ok(())
}

fn resolve_config(cli: Cli) -> anyhow::Result<ReconcileConfig> {
    let mut config = match cli.config {
        Some(path) => load(&path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load(Path::new(DEFAULT_CONFIG_FILE))?,
        None => ReconcileConfig::default(),
    };

    if let Some(dir) = cli.scratch_dir {
        config.scratch_dir = dir;
    }
    if let Some(dir) = cli.target_dir {
        config.target_dir = dir;
    }
    config.protected.extend(cli.protect);

    config.validate()?;
    Ok(config)
}

fn load(path: &Path) -> anyhow::Result<ReconcileConfig> {
    ReconcileConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
