//! CLI command implementations.

pub mod countries;
pub mod show;
pub mod watch;

pub use countries::CountriesCommand;
pub use show::ShowCommand;
pub use watch::WatchCommand;

use crate::config::{Config, FetchMode};
use crate::scoreboard::{ScoreboardClient, ScoreboardSource};
use anyhow::{Context, Result};

/// Builds the scoreboard source for the configured fetch mode.
pub fn source_for(config: &Config) -> Result<Box<dyn ScoreboardSource>> {
    match config.mode {
        FetchMode::Http => {
            let client = ScoreboardClient::new(config).context("Failed to create HTTP client")?;
            Ok(Box::new(client))
        }
        #[cfg(feature = "render")]
        FetchMode::Render => Ok(Box::new(crate::scoreboard::RenderedClient::new(config))),
        #[cfg(not(feature = "render"))]
        FetchMode::Render => {
            anyhow::bail!("Fetch mode 'render' requires building with the 'render' feature")
        }
    }
}
