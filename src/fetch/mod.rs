//! Game data sources.
//!
//! The ranking core only needs a finite list of [`GameRecord`]s. This module
//! provides the ways of getting one: the CollegeFootballData HTTP API (with a
//! local response cache) and a JSON file on disk.

mod client;

pub use client::{CacheMetadata, CfbdClient, FetcherConfig};

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tracing::info;

use crate::models::GameRecord;

/// Errors that can occur while loading games.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Content too large: {size} bytes (max {max_size})")]
    ContentTooLarge { size: usize, max_size: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No API key configured (set source.api_key or CFBD_API_KEY)")]
    MissingApiKey,

    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}

/// Which slice of a season to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonQuery {
    pub year: i32,

    /// Provider season type, e.g. "regular" or "postseason"
    pub season_type: Option<String>,
}

impl SeasonQuery {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            season_type: None,
        }
    }

    pub fn with_season_type(mut self, season_type: impl Into<String>) -> Self {
        self.season_type = Some(season_type.into());
        self
    }
}

/// Anything that can produce a season's game list.
#[async_trait]
pub trait GameSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Load every game for the season.
    async fn fetch_games(&self, query: &SeasonQuery) -> Result<Vec<GameRecord>, FetchError>;
}

/// Games stored as a JSON array on disk.
///
/// The file holds one season, so the query is not consulted.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GameSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_games(&self, _query: &SeasonQuery) -> Result<Vec<GameRecord>, FetchError> {
        let content = fs::read_to_string(&self.path).await?;
        let games: Vec<GameRecord> = serde_json::from_str(&content)?;
        info!("Loaded {} games from {}", games.len(), self.path.display());
        Ok(games)
    }
}

/// Write games as a pretty-printed JSON array, creating parent directories.
pub async fn save_games(path: &Path, games: &[GameRecord]) -> Result<(), FetchError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(games)?;
    fs::write(path, json).await?;
    info!("Saved {} games to {}", games.len(), path.display());
    Ok(())
}
