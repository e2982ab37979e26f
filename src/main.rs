use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conference_dominance::api::{build_router, state::AppState};
use conference_dominance::calculate;
use conference_dominance::config::AppConfig;
use conference_dominance::fetch::{self, CfbdClient, FileSource, GameSource, SeasonQuery};
use conference_dominance::models::{GameRecord, WeightedCredit};
use conference_dominance::render::{self, DEFAULT_CHART_WIDTH};

#[derive(Parser)]
#[command(name = "conference-dominance")]
#[command(about = "College football conference dominance rankings from transitive win credit")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Read games from a JSON file instead of the API
    #[arg(long)]
    games_file: Option<PathBuf>,

    /// Season year; overrides the config file
    #[arg(long)]
    year: Option<i32>,

    /// Season type (regular, postseason, ...); overrides the config file
    #[arg(long)]
    season_type: Option<String>,

    /// Ignore cached API responses
    #[arg(long)]
    refresh: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List conferences that played conference games
    Conferences,

    /// Rank the teams of one conference
    Rank {
        /// Conference name, e.g. "SEC" or "Big Ten"
        #[arg(long, short)]
        conference: String,

        /// Show the detailed credit breakdown
        #[arg(long)]
        details: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Chart width in characters
        #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },

    /// Download the season's games and save them as JSON
    Fetch {
        /// Output file
        #[arg(long, default_value = "./data/games.json")]
        out: PathBuf,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(year) = cli.year {
        config.source.year = year;
    }
    if cli.season_type.is_some() {
        config.source.season_type = cli.season_type.clone();
    }
    config.validate()?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting conference-dominance v{}", env!("CARGO_PKG_VERSION"));

    let query = config.source.season_query();
    let games_file = cli.games_file.as_deref();

    match cli.command {
        Commands::Conferences => {
            let games = load_games(games_file, cli.refresh, &config, &query).await?;
            print!("{}", render::render_conference_list(&calculate::list_conferences(&games)));
        }
        Commands::Rank {
            conference,
            details,
            json,
            width,
        } => {
            let games = load_games(games_file, cli.refresh, &config, &query).await?;
            let mut report = calculate::analyze_report(&games, &conference);

            if report.is_empty() {
                tracing::warn!(
                    "No completed conference games for {:?} in {}",
                    conference,
                    query.year
                );
            }

            if json {
                if !details {
                    report.rankings = report
                        .rankings
                        .into_iter()
                        .map(WeightedCredit::without_details)
                        .collect();
                }
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report, width, details));
            }
        }
        Commands::Fetch { out } => {
            let client = CfbdClient::new(config.source.fetcher_config(cli.refresh))?;
            let games = client
                .fetch_games(&query)
                .await
                .with_context(|| format!("Failed to fetch games for {}", query.year))?;
            fetch::save_games(&out, &games).await?;

            println!("\n=== Fetch Results ===");
            println!("Season:           {}", query.year);
            println!("Games:            {}", games.len());
            println!(
                "Completed:        {}",
                games.iter().filter(|g| g.completed).count()
            );
            println!("Saved to:         {}", out.display());
        }
        Commands::Serve { host, port } => {
            let games = load_games(games_file, cli.refresh, &config, &query).await?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(games, query.year);
            let app = build_router(state, &config.server);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Serving rankings on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    // Logs go to stderr so report output on stdout stays clean.
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load the season from `--games-file` when given, otherwise from the API.
async fn load_games(
    games_file: Option<&Path>,
    refresh: bool,
    config: &AppConfig,
    query: &SeasonQuery,
) -> Result<Vec<GameRecord>> {
    let source: Box<dyn GameSource> = match games_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(CfbdClient::new(config.source.fetcher_config(refresh))?),
    };

    source
        .fetch_games(query)
        .await
        .with_context(|| format!("Failed to load games from {}", source.name()))
}
