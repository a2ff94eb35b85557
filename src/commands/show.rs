//! Show command implementation.

use crate::commands::source_for;
use crate::config::Config;
use crate::format::Formatter;
use crate::pipeline::{Pipeline, Refresh};
use crate::scoreboard::ScoreboardSource;
use anyhow::Result;
use tracing::info;

/// Renders the scoreboard once.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the scoreboard and returns formatted output.
    ///
    /// Only setup problems are errors; a failed refresh still renders.
    pub async fn execute(&self) -> Result<String> {
        let source = source_for(&self.config)?;
        Ok(self.execute_with_source(source).await)
    }

    /// Runs one refresh against a provided source (for testing).
    pub async fn execute_with_source(&self, source: Box<dyn ScoreboardSource>) -> String {
        info!("Loading scoreboard from {} ({})", source.url(), source.mode());

        let formatter = Formatter::new(self.config.format).top_countries(self.config.top_countries);
        let pipeline = Pipeline::new(source, self.config.clone());
        let refresh: Refresh = pipeline.refresh().await;

        formatter.format_refresh(&refresh)
    }
}
