//! Watch command: re-renders the scoreboard on a fixed interval.

use crate::commands::source_for;
use crate::config::{Config, OutputFormat, MAX_REFRESH_SECS, MIN_REFRESH_SECS};
use crate::format::Formatter;
use crate::pipeline::Pipeline;
use crate::scoreboard::ScoreboardSource;
use anyhow::Result;
use std::io::{self, IsTerminal, Write};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Refreshes and prints the scoreboard until interrupted.
pub struct WatchCommand {
    config: Config,
    max_ticks: Option<usize>,
}

impl WatchCommand {
    /// Creates a new watch command.
    pub fn new(config: Config) -> Self {
        Self { config, max_ticks: None }
    }

    /// Stops after `n` refreshes instead of waiting for Ctrl-C.
    pub fn max_ticks(mut self, n: usize) -> Self {
        self.max_ticks = Some(n);
        self
    }

    /// Runs the refresh loop against the configured source, printing to stdout.
    pub async fn execute(&self) -> Result<()> {
        let source = source_for(&self.config)?;
        let mut stdout = io::stdout();
        let redraw = stdout.is_terminal() && self.config.format == OutputFormat::Table;

        self.execute_with_source(source, &mut stdout, redraw).await
    }

    /// Runs the refresh loop against a provided source.
    ///
    /// With `redraw` set the screen is cleared before each frame. Ticks never
    /// overlap: the next one is scheduled after the current refresh finishes.
    pub async fn execute_with_source<W: Write>(
        &self,
        source: Box<dyn ScoreboardSource>,
        out: &mut W,
        redraw: bool,
    ) -> Result<()> {
        if !(MIN_REFRESH_SECS..=MAX_REFRESH_SECS).contains(&self.config.refresh_secs) {
            warn!(
                "Refresh interval {}s outside {}..={}s, clamping",
                self.config.refresh_secs, MIN_REFRESH_SECS, MAX_REFRESH_SECS
            );
        }
        let period = self.config.refresh_interval();
        info!("Watching {} every {}s", source.url(), period.as_secs());

        let formatter = Formatter::new(self.config.format).top_countries(self.config.top_countries);
        let pipeline = Pipeline::new(source, self.config.clone());

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0usize;
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = tokio::signal::ctrl_c() => break,
            }

            let refresh = tokio::select! {
                refresh = pipeline.refresh() => refresh,
                _ = tokio::signal::ctrl_c() => break,
            };

            if redraw {
                write!(out, "{}", CLEAR_SCREEN)?;
            }
            writeln!(out, "{}", formatter.format_refresh(&refresh))?;
            if redraw {
                writeln!(out, "\nRefreshing every {}s. Press Ctrl-C to stop.", period.as_secs())?;
            }
            out.flush()?;

            ticks += 1;
            debug!("Watch tick {} done", ticks);
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
        }

        info!("Watch stopped after {} refreshes", ticks);
        Ok(())
    }
}
