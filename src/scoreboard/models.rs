//! Data models for scoreboard pages, tables, contestants and rankings.

use crate::config::FetchMode;
use serde::Serialize;
use std::fmt;

/// HTML of a successfully fetched scoreboard page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub html: String,
    pub mode: FetchMode,
}

impl RawPage {
    pub fn new(html: impl Into<String>, mode: FetchMode) -> Self {
        Self { html: html.into(), mode }
    }
}

/// Rectangular table of raw cell text, as found on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreboardTable {
    /// Trimmed header names, in page order
    pub columns: Vec<String>,
    /// One entry per data row, each with exactly `columns.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl ScoreboardTable {
    /// Returns the position of a column by its (trimmed) name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.columns.iter().position(|c| c.trim() == name)
    }

    /// Returns a cell by row position and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Returns every value of a column in row order.
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        match self.column_index(column) {
            Some(idx) => self
                .rows
                .iter()
                .filter_map(|row| row.get(idx).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Score on a single task; `None` when the cell was blank or not a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemScore {
    pub task: String,
    pub score: Option<f64>,
}

/// One competing contestant after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestantRecord {
    /// Raw identifier, e.g. "PAK02"
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// First three characters of the identifier
    pub country_code: String,
    /// Display name, or the code itself when unmapped
    pub country: String,
    pub problem_scores: Vec<ProblemScore>,
    pub total_score: f64,
    /// Zero-based row position in the parsed table, organizer rows included
    pub source_row: usize,
}

impl ContestantRecord {
    /// Returns "First Last", skipping empty parts.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Summed score of one country with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAggregate {
    /// 1-based rank
    pub rank: usize,
    pub country: String,
    pub total_score: f64,
    pub contestants: usize,
}

/// Ranking entries around a country of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingWindow {
    pub country: String,
    pub rank: usize,
    pub entries: Vec<CountryAggregate>,
}

/// Outcome of looking up the focus country in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FocusWindow {
    Ranked(RankingWindow),
    /// The country has no retained contestants.
    NotRanked { country: String },
}

/// A 1-based rank, or the sentinel for a contestant that could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Known(usize),
    Unknown,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Known(n) => write!(f, "{}", n),
            Rank::Unknown => write!(f, "?"),
        }
    }
}

/// A focus contestant with both of their ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestantStanding {
    pub id: String,
    pub name: String,
    pub country: String,
    pub problem_scores: Vec<ProblemScore>,
    pub total_score: Option<f64>,
    /// Position on the scoreboard as published, staff rows included
    pub overall_rank: Rank,
    /// Position by total score among competing contestants
    pub competitor_rank: Rank,
}

/// Everything the renderer may consume from one refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub records: Vec<ContestantRecord>,
    pub ranking: Vec<CountryAggregate>,
    pub focus_country: String,
    pub window: FocusWindow,
    pub standings: Vec<ContestantStanding>,
}
