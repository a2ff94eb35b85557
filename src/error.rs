//! Error taxonomy for the scoreboard pipeline.

use serde::Serialize;
use thiserror::Error;

/// Broad class of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Fetch,
    Parse,
    Normalization,
    Internal,
}

/// Everything that can stop a refresh from producing a snapshot.
///
/// None of these are fatal: the pipeline converts them into a degraded
/// refresh and the next tick tries again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreboardError {
    /// Network error, timeout, bad status or browser failure.
    #[error("could not fetch scoreboard: {0}")]
    Fetch(String),

    #[error("table #{0} not found in page")]
    TableNotFound(String),

    #[error("identifier column '{0}' missing from table headers")]
    MissingIdColumn(String),

    /// A data row whose cell count disagrees with the header.
    #[error("row {row} has {found} cells but the header has {expected}")]
    RowShape { row: usize, expected: usize, found: usize },

    #[error("no column matches score keywords {}", keywords.join(", "))]
    NoScoreColumn { keywords: Vec<String> },

    /// The table parsed fine but has no data rows.
    #[error("scoreboard table has no rows")]
    EmptyScoreboard,

    /// Rows existed but every one was dropped during normalization.
    #[error("all {0} rows were dropped during normalization")]
    NoRecords(usize),

    #[error("internal pipeline failure: {0}")]
    Internal(String),
}

impl ScoreboardError {
    /// Stable diagnostic code for the renderer.
    pub fn code(&self) -> &'static str {
        match self {
            ScoreboardError::Fetch(_) => "fetch_failed",
            ScoreboardError::TableNotFound(_) => "table_not_found",
            ScoreboardError::MissingIdColumn(_) => "missing_id_column",
            ScoreboardError::RowShape { .. } => "row_shape",
            ScoreboardError::NoScoreColumn { .. } => "no_score_column",
            ScoreboardError::EmptyScoreboard => "empty_scoreboard",
            ScoreboardError::NoRecords(_) => "no_records",
            ScoreboardError::Internal(_) => "internal",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreboardError::Fetch(_) => ErrorKind::Fetch,
            ScoreboardError::TableNotFound(_)
            | ScoreboardError::MissingIdColumn(_)
            | ScoreboardError::RowShape { .. } => ErrorKind::Parse,
            ScoreboardError::NoScoreColumn { .. }
            | ScoreboardError::EmptyScoreboard
            | ScoreboardError::NoRecords(_) => ErrorKind::Normalization,
            ScoreboardError::Internal(_) => ErrorKind::Internal,
        }
    }
}
