mod api;
mod cli;
mod config;
mod error;
mod models;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "euro-dashboard")]
#[command(about = "Euro 2020 team performance statistics and chart data")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List the teams in the loaded data
    Teams,
    /// Print a chart description as JSON
    Chart {
        /// offensive, defensive, parallel-coordinates, radar, goal-distribution (or tab-1..tab-5)
        #[arg(short, long)]
        kind: String,
        #[arg(short, long)]
        team: Option<String>,
        /// Second team for the radar chart
        #[arg(short, long)]
        compare: Option<String>,
    },
    /// Show aggregated and normalized statistics for a team
    Summary {
        #[arg(short, long)]
        team: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    tracing::info!(
        "Loading statistics from {} and {}",
        config.match_stats_path.display(),
        config.goal_events_path.display()
    );
    let dashboard = services::load_dashboard(&config)?;

    match cli.command {
        Some(Commands::Teams) => {
            cli::list_teams(&dashboard)?;
        }
        Some(Commands::Chart { kind, team, compare }) => {
            let team = team.unwrap_or_else(|| config.default_team.clone());
            cli::print_chart(&dashboard, &kind, &team, compare.as_deref())?;
        }
        Some(Commands::Summary { team }) => {
            let team = team.unwrap_or_else(|| config.default_team.clone());
            cli::team_summary(&dashboard, &team)?;
        }
        Some(Commands::Serve { port }) => {
            let port = port.unwrap_or(config.port);
            tracing::info!("Starting dashboard API server on port {}", port);
            api::serve(app_state(dashboard, &config), port).await?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting dashboard API server on port {}", config.port);
            api::serve(app_state(dashboard, &config), config.port).await?;
        }
    }

    Ok(())
}

fn app_state(dashboard: services::Dashboard, config: &Config) -> api::AppState {
    api::AppState {
        dashboard: Arc::new(dashboard),
        default_team: config.default_team.clone(),
    }
}
