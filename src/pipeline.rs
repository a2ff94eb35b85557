//! One refresh: fetch, parse, normalize and rank.

use crate::config::Config;
use crate::error::ScoreboardError;
use crate::filters::FilterChainBuilder;
use crate::normalize::{NormalizeSpec, Normalizer};
use crate::ranking::RankingEngine;
use crate::scoreboard::countries;
use crate::scoreboard::{parse_scoreboard, PageCache, RawPage, ScoreboardSource, Snapshot, TableSpec};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one refresh tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    Ready(Snapshot),
    /// Nothing to show this tick; the next one retries.
    Degraded(ScoreboardError),
}

impl Refresh {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Refresh::Ready(snapshot) => Some(snapshot),
            Refresh::Degraded(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ScoreboardError> {
        match self {
            Refresh::Ready(_) => None,
            Refresh::Degraded(err) => Some(err),
        }
    }
}

/// Builds a snapshot from page HTML.
pub fn build_snapshot(html: &str, config: &Config) -> Result<Snapshot, ScoreboardError> {
    let table_spec =
        TableSpec { table_id: config.table_id.clone(), id_column: config.id_column.clone() };
    let table = parse_scoreboard(html, &table_spec)?;

    // header problems are reported even when the table has no rows
    let normalizer = Normalizer::new(NormalizeSpec::from(config));
    let records = normalizer.normalize(&table)?;

    if table.is_empty() {
        return Err(ScoreboardError::EmptyScoreboard);
    }
    if records.is_empty() {
        return Err(ScoreboardError::NoRecords(table.len()));
    }

    // a delegation code is accepted in place of the display name
    let focus_country = countries::country_name(config.focus_country.trim())
        .map(String::from)
        .unwrap_or_else(|| config.focus_country.trim().to_string());

    let parsed_ids: Vec<String> =
        table.column_values(&config.id_column).into_iter().map(String::from).collect();

    let subset_ids: Vec<String> = if config.focus_contestants.is_empty() {
        let filters = FilterChainBuilder::new().country(Some(focus_country.as_str())).build();
        debug!("Focus subset filters: {}", filters.descriptions().join(", "));

        filters.select(&records).into_iter().map(|r| r.id.clone()).collect()
    } else {
        debug!("Focus subset: {} configured contestants", config.focus_contestants.len());
        config.focus_contestants.clone()
    };

    let engine = RankingEngine::new(focus_country.clone(), config.window_radius);
    let rankings = engine.evaluate(&parsed_ids, &records, &subset_ids);

    Ok(Snapshot {
        records,
        ranking: rankings.ranking,
        focus_country,
        window: rankings.window,
        standings: rankings.standings,
    })
}

/// Runs the scoreboard chain against a source, caching fetched pages.
pub struct Pipeline {
    source: Box<dyn ScoreboardSource>,
    cache: PageCache,
    config: Arc<Config>,
}

impl Pipeline {
    pub fn new(source: Box<dyn ScoreboardSource>, config: Config) -> Self {
        let cache = PageCache::new(config.cache_ttl());
        Self { source, cache, config: Arc::new(config) }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs one refresh. Never fails: every error becomes [`Refresh::Degraded`].
    pub async fn refresh(&self) -> Refresh {
        match self.run().await {
            Ok(snapshot) => {
                info!(
                    "Refresh complete: {} contestants, {} countries",
                    snapshot.records.len(),
                    snapshot.ranking.len()
                );
                Refresh::Ready(snapshot)
            }
            Err(err) => {
                warn!("Refresh degraded [{}]: {}", err.code(), err);
                Refresh::Degraded(err)
            }
        }
    }

    async fn run(&self) -> Result<Snapshot, ScoreboardError> {
        let page = self
            .cache
            .get_or_fetch(|| async {
                match self.source.fetch().await {
                    Ok(html) => {
                        debug!("Fetched {} bytes from {}", html.len(), self.source.url());
                        Ok(RawPage::new(html, self.source.mode()))
                    }
                    Err(e) => {
                        warn!("Fetch from {} failed: {:#}", self.source.url(), e);
                        Err(ScoreboardError::Fetch(format!("{:#}", e)))
                    }
                }
            })
            .await?;

        debug!("Building snapshot from {} page ({} bytes)", page.mode, page.html.len());

        let config = Arc::clone(&self.config);
        run_blocking(move || build_snapshot(&page.html, &config)).await
    }
}

/// Runs CPU-bound snapshot work off the runtime; a panic becomes [`ScoreboardError::Internal`].
async fn run_blocking<T, F>(work: F) -> Result<T, ScoreboardError>
where
    F: FnOnce() -> Result<T, ScoreboardError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ScoreboardError::Internal(e.to_string()))?
}
