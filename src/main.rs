use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{ConfigOverrides, DashboardConfig, load_config};
use loader::LiveDataLoader;
use std::path::PathBuf;

mod logging;
mod report;

/// The main entry point for the Evolutis live dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; it only carries optional overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_logging(cli.log_dir.as_deref())?;

    match cli.command {
        Commands::Serve(overrides) => {
            let config = load(&overrides)?;
            web_server::run_server(config)
                .await
                .context("Web server stopped with an error")
        }
        Commands::Report(args) => {
            let config = load(&args.into())?;
            handle_report(&config).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Read-only dashboard over a paper-trading run's live data directory.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Also write daily-rolling log files into this directory.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard page and JSON API over HTTP.
    Serve(ConfigOverrides),
    /// Print the dashboard once to the terminal.
    Report(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Path to a TOML configuration file (default: ./dashboard.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding portfolio_history.csv, trades.csv and summary.json.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl From<ReportArgs> for ConfigOverrides {
    fn from(args: ReportArgs) -> Self {
        Self {
            config: args.config,
            data_dir: args.data_dir,
            ..Self::default()
        }
    }
}

fn load(overrides: &ConfigOverrides) -> anyhow::Result<DashboardConfig> {
    load_config(overrides).context("Failed to load dashboard configuration")
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

async fn handle_report(config: &DashboardConfig) -> anyhow::Result<()> {
    let loader = LiveDataLoader::new(config.data.live_data_dir());
    let deriver = analytics::MetricsDeriver::new(config.display.recent_trades);

    tracing::debug!(data_dir = %loader.data_dir().display(), "Building terminal report.");
    let dashboard = tokio::task::spawn_blocking(move || deriver.derive(&loader.load()))
        .await
        .context("Report task failed")?;

    println!("{}", report::render_report(&config.display.title, &dashboard));
    Ok(())
}
