//! ioi-scoreboard - Live IOI scoreboard dashboard for the terminal
//!
//! Fetches the public ranking page, normalizes contestant rows and ranks
//! countries by their summed scores.

pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod scoreboard;

pub use config::{Config, FetchMode, OutputFormat};
pub use error::{ErrorKind, ScoreboardError};
pub use pipeline::{build_snapshot, Pipeline, Refresh};
pub use scoreboard::models::{
    ContestantRecord, ContestantStanding, CountryAggregate, FocusWindow, Rank, Snapshot,
};
