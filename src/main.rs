mod api;
mod cli;
mod config;
mod error;
mod models;
mod services;
mod store;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::PipelineConfig;
use crate::models::{Conference, Division};

#[derive(Parser)]
#[command(name = "nfldiff")]
#[command(about = "Weekly NFL win-loss differentials and the dashboard that serves them")]
struct Cli {
    /// Directory holding nfl.csv and teams.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard API server
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Fetch a season's results and write weekly differentials
    Fetch {
        #[arg(short, long)]
        season: Option<u16>,
        /// Results page to read instead of the default for the season
        #[arg(short, long)]
        url: Option<String>,
        /// Keep a copy of the fetched page
        #[arg(long)]
        save_html: Option<PathBuf>,
    },
    /// Run the pipeline on a saved results page
    Process {
        #[arg(long)]
        html: PathBuf,
    },
    /// Write the reference team list
    Teams,
    /// Show one team's weekly series
    Team {
        #[arg(short, long)]
        name: String,
    },
    /// Show a division table at a given week
    Standings {
        #[arg(short, long, default_value = "AFC")]
        conference: Conference,
        #[arg(short, long, default_value = "East")]
        division: Division,
        #[arg(short, long)]
        week: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Some(Commands::Serve { port }) => {
            tracing::info!("Starting dashboard API server on port {}", port);
            api::serve(port, &config).await?;
        }
        Some(Commands::Fetch { season, url, save_html }) => {
            if let Some(season) = season {
                config = config.with_season(season);
            }
            if let Some(url) = url {
                config.source_url = url;
            }
            tracing::info!("Fetching season {}", config.season);
            cli::fetch_data(&config, save_html.as_deref()).await?;
        }
        Some(Commands::Process { html }) => {
            tracing::info!("Processing {}", html.display());
            cli::process_page(&config, &html)?;
        }
        Some(Commands::Teams) => {
            cli::write_reference_teams(&config)?;
        }
        Some(Commands::Team { name }) => {
            tracing::info!("Querying team: {}", name);
            cli::query_team(&config, &name)?;
        }
        Some(Commands::Standings { conference, division, week }) => {
            cli::show_standings(&config, conference, division, week)?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting dashboard API server on port 3000");
            api::serve(3000, &config).await?;
        }
    }

    Ok(())
}
