//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Shortest and longest allowed refresh interval, in seconds.
pub const MIN_REFRESH_SECS: u64 = 10;
pub const MAX_REFRESH_SECS: u64 = 120;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scoreboard page URL
    #[serde(default = "default_url")]
    pub url: String,

    /// How the page is fetched
    #[serde(default)]
    pub mode: FetchMode,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Time given to client-side rendering before the DOM is captured (render mode)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Chrome/Chromium executable (render mode); autodetected when unset
    #[serde(default)]
    pub chrome_path: Option<String>,

    /// How long a fetched page is reused
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// `id` attribute of the scoreboard table
    #[serde(default = "default_table_id")]
    pub table_id: String,

    /// Header of the contestant identifier column
    #[serde(default = "default_id_column")]
    pub id_column: String,

    /// Country code used by organizer/staff accounts
    #[serde(default = "default_organizer_code")]
    pub organizer_code: String,

    /// Substrings identifying the final score column; the last matching header wins
    #[serde(default = "default_score_keywords")]
    pub score_keywords: Vec<String>,

    /// Per-task score columns shown for focus contestants
    #[serde(default = "default_task_columns")]
    pub task_columns: Vec<String>,

    /// Country of interest (display name)
    #[serde(default = "default_focus_country")]
    pub focus_country: String,

    /// Explicit contestant IDs of interest; empty means every contestant of `focus_country`
    #[serde(default)]
    pub focus_contestants: Vec<String>,

    /// Ranks shown on each side of the focus country
    #[serde(default = "default_window_radius")]
    pub window_radius: usize,

    /// Number of countries in the overall chart
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,

    /// Seconds between refreshes in watch mode
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_url() -> String {
    "https://ranking.ioi2025.bo".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_settle_ms() -> u64 {
    3000
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_table_id() -> String {
    "Scoreboard".to_string()
}

fn default_id_column() -> String {
    "ID".to_string()
}

fn default_organizer_code() -> String {
    "IOI".to_string()
}

fn default_score_keywords() -> Vec<String> {
    vec!["Day".to_string(), "Score".to_string(), "Global".to_string()]
}

fn default_task_columns() -> Vec<String> {
    vec!["souvenirs".to_string(), "triples".to_string(), "worldmap".to_string()]
}

fn default_focus_country() -> String {
    "Pakistan".to_string()
}

fn default_window_radius() -> usize {
    5
}

fn default_top_countries() -> usize {
    50
}

fn default_refresh_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: default_url(),
            mode: FetchMode::Http,
            proxy: None,
            timeout_secs: default_timeout_secs(),
            settle_ms: default_settle_ms(),
            chrome_path: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            table_id: default_table_id(),
            id_column: default_id_column(),
            organizer_code: default_organizer_code(),
            score_keywords: default_score_keywords(),
            task_columns: default_task_columns(),
            focus_country: default_focus_country(),
            focus_contestants: Vec::new(),
            window_radius: default_window_radius(),
            top_countries: default_top_countries(),
            refresh_secs: default_refresh_secs(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ioi-scoreboard").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("SCOREBOARD_URL") {
            self.url = url;
        }

        if let Ok(mode) = std::env::var("SCOREBOARD_MODE") {
            if let Ok(m) = mode.parse() {
                self.mode = m;
            }
        }

        if let Ok(country) = std::env::var("SCOREBOARD_COUNTRY") {
            self.focus_country = country;
        }

        if let Ok(proxy) = std::env::var("SCOREBOARD_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(interval) = std::env::var("SCOREBOARD_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.refresh_secs = secs;
            }
        }

        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Refresh interval clamped to the supported range.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS))
    }
}

/// How the scoreboard page is retrieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Headless browser, for tables built by JavaScript
    Render,
}

impl std::str::FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(FetchMode::Http),
            "render" | "browser" => Ok(FetchMode::Render),
            _ => Err(format!("Unknown fetch mode: {}. Use: http, render", s)),
        }
    }
}

impl std::fmt::Display for FetchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchMode::Http => write!(f, "http"),
            FetchMode::Render => write!(f, "render"),
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
