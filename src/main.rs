use clap::Parser;
use debtop::commands::{self, StatsOptions};
use debtop::mirror;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "debtop")]
#[command(author, version, about = "Package statistics from Debian Contents indices", long_about = None)]
struct Cli {
    /// Architecture of the Contents index, e.g. amd64, arm64, i386
    architecture: String,

    /// How many packages to print
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,

    /// Debian mirror base URL
    #[arg(long, default_value = mirror::DEFAULT_MIRROR)]
    mirror: String,

    /// Distribution suite, e.g. stable, testing, sid
    #[arg(long, default_value = mirror::DEFAULT_SUITE)]
    suite: String,

    /// Archive component, e.g. main, contrib, non-free
    #[arg(long, default_value = mirror::DEFAULT_COMPONENT)]
    component: String,

    /// Read a local Contents file (.gz or plain) instead of downloading
    #[arg(long, value_name = "PATH", conflicts_with_all = ["mirror", "suite", "component", "verify"])]
    file: Option<PathBuf>,

    /// Check the index against the Release file's SHA256 before parsing
    #[arg(long)]
    verify: bool,

    /// Print the ranking as JSON instead of tab-separated rows
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so stdout stays machine-readable.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let options = StatsOptions {
        architecture: cli.architecture,
        top: cli.top,
        mirror: cli.mirror,
        suite: cli.suite,
        component: cli.component,
        file: cli.file,
        verify: cli.verify,
        json: cli.json,
    };

    commands::stats(&options).await?;

    Ok(())
}
