//! CollegeFootballData API client with a local response cache.
//!
//! Responses are cached under `cache_dir/<host>/<hash>.json` with a
//! `<hash>.meta.json` sidecar recording when they were fetched.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use super::{FetchError, GameSource, SeasonQuery};
use crate::models::GameRecord;

/// Metadata stored alongside a cached response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub content_length: usize,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// API root, e.g. https://api.collegefootballdata.com
    pub base_url: String,

    /// Bearer token
    pub api_key: Option<String>,

    /// Directory to cache raw responses
    pub cache_dir: PathBuf,

    /// How long cached responses are considered fresh
    pub cache_ttl: Duration,

    /// Ignore the cache and always hit the network
    pub refresh: bool,

    /// Maximum response size (default 50MB)
    pub max_content_size: usize,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.collegefootballdata.com".to_string(),
            api_key: None,
            cache_dir: PathBuf::from("./data/cache"),
            cache_ttl: Duration::from_secs(3600), // 1 hour
            refresh: false,
            max_content_size: 50 * 1024 * 1024, // 50MB
            timeout: Duration::from_secs(30),
            user_agent: concat!("conference-dominance/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP client for the `/games` endpoint.
pub struct CfbdClient {
    client: Client,
    config: FetcherConfig,
}

impl CfbdClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let api_key = config.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("conference-dominance")),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| FetchError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// URL of the games listing for a season.
    pub fn games_url(&self, query: &SeasonQuery) -> Result<Url, FetchError> {
        let base = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&base)
            .and_then(|u| u.join("games"))
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("year", &query.year.to_string());
            if let Some(ref season_type) = query.season_type {
                pairs.append_pair("seasonType", season_type);
            }
        }

        Ok(url)
    }

    /// Load a season, preferring a fresh cache entry.
    ///
    /// A response is only cached once it decodes as a game list. A cached
    /// entry that no longer decodes is ignored and replaced from the network.
    async fn load_games(&self, url: &Url) -> Result<Vec<GameRecord>, FetchError> {
        let cache_path = self.cache_path_for_url(url);
        let meta_path = self.meta_path_for_url(url);

        if !self.config.refresh {
            if let Some(body) = self.check_cache(url, &cache_path, &meta_path).await? {
                match serde_json::from_str::<Vec<GameRecord>>(&body) {
                    Ok(games) => return Ok(games),
                    Err(e) => warn!("Ignoring unreadable cache entry for {}: {}", url, e),
                }
            }
        }

        let body = self.download(url).await?;
        let games: Vec<GameRecord> = serde_json::from_str(&body)?;
        self.write_cache(url, &body, &cache_path, &meta_path).await?;
        Ok(games)
    }

    /// Return the cached body if present and fresh.
    ///
    /// A missing, unreadable or malformed sidecar counts as a cache miss.
    async fn check_cache(
        &self,
        url: &Url,
        cache_path: &Path,
        meta_path: &Path,
    ) -> Result<Option<String>, FetchError> {
        if !cache_path.exists() || !meta_path.exists() {
            return Ok(None);
        }

        let meta_content = match fs::read_to_string(meta_path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("Unreadable cache metadata {}: {}", meta_path.display(), e);
                return Ok(None);
            }
        };
        let meta: CacheMetadata = match serde_json::from_str(&meta_content) {
            Ok(m) => m,
            Err(_) => return Ok(None),
        };

        let age = Utc::now().signed_duration_since(meta.fetched_at);
        if age.num_seconds() > self.config.cache_ttl.as_secs() as i64 {
            debug!("Cache expired for {}", url);
            return Ok(None);
        }

        match fs::read_to_string(cache_path).await {
            Ok(body) => {
                info!("Serving {} from cache", url);
                Ok(Some(body))
            }
            Err(e) => {
                debug!("Unreadable cache entry {}: {}", cache_path.display(), e);
                Ok(None)
            }
        }
    }

    /// Fetch a body from the network.
    async fn download(&self, url: &Url) -> Result<String, FetchError> {
        info!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(FetchError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let content = response.bytes().await?;

        if content.len() > self.config.max_content_size {
            return Err(FetchError::ContentTooLarge {
                size: content.len(),
                max_size: self.config.max_content_size,
            });
        }

        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    /// Store a decoded response and its metadata sidecar.
    async fn write_cache(
        &self,
        url: &Url,
        body: &str,
        cache_path: &Path,
        meta_path: &Path,
    ) -> Result<(), FetchError> {
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(cache_path).await?;
        file.write_all(body.as_bytes()).await?;
        file.flush().await?;

        let fetched_at = Utc::now();
        let meta = CacheMetadata {
            url: url.to_string(),
            fetched_at,
            content_length: body.len(),
            expires_at: Some(
                fetched_at + chrono::Duration::seconds(self.config.cache_ttl.as_secs() as i64),
            ),
        };
        fs::write(meta_path, serde_json::to_string_pretty(&meta)?).await?;
        Ok(())
    }

    /// Generate a cache path for a URL.
    fn cache_path_for_url(&self, url: &Url) -> PathBuf {
        let host = url.host_str().unwrap_or("unknown");
        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.json", Self::url_hash(url)))
    }

    /// Generate a metadata path for a URL.
    fn meta_path_for_url(&self, url: &Url) -> PathBuf {
        let host = url.host_str().unwrap_or("unknown");
        self.config
            .cache_dir
            .join(host)
            .join(format!("{}.meta.json", Self::url_hash(url)))
    }

    /// Hash a URL to a short string.
    fn url_hash(url: &Url) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_str().as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8])
    }
}

#[async_trait]
impl GameSource for CfbdClient {
    fn name(&self) -> &'static str {
        "collegefootballdata"
    }

    async fn fetch_games(&self, query: &SeasonQuery) -> Result<Vec<GameRecord>, FetchError> {
        let url = self.games_url(query)?;
        let games = self.load_games(&url).await?;
        info!("Loaded {} games for {}", games.len(), query.year);
        Ok(games)
    }
}
