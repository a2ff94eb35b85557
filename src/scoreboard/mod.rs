//! Scoreboard fetching, caching, table parsing and the delegation code table.

#[cfg(feature = "render")]
pub mod browser;
pub mod cache;
pub mod client;
pub mod countries;
pub mod models;
pub mod parser;
pub mod selectors;

#[cfg(feature = "render")]
pub use browser::RenderedClient;
pub use cache::PageCache;
pub use client::{ScoreboardClient, ScoreboardSource};
pub use models::{
    ContestantRecord, ContestantStanding, CountryAggregate, FocusWindow, ProblemScore, Rank,
    RankingWindow, RawPage, ScoreboardTable, Snapshot,
};
pub use parser::{parse_scoreboard, TableSpec};
