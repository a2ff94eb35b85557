//! Turns raw scoreboard rows into contestant records.

pub mod score_column;

use crate::config::Config;
use crate::error::ScoreboardError;
use crate::scoreboard::countries;
use crate::scoreboard::models::{ContestantRecord, ProblemScore, ScoreboardTable};
use tracing::{debug, trace};

pub use score_column::{coerce_score, ScoreColumnStrategy};

const FIRST_NAME_COLUMNS: &[&str] = &["First Name", "FirstName"];
const LAST_NAME_COLUMNS: &[&str] = &["Last Name", "LastName"];

/// Rules applied while normalizing a table.
#[derive(Debug, Clone)]
pub struct NormalizeSpec {
    pub id_column: String,
    /// Code of staff/demo accounts, which are not competing
    pub organizer_code: String,
    pub score_column: ScoreColumnStrategy,
    /// Per-task columns carried into each record
    pub task_columns: Vec<String>,
}

impl Default for NormalizeSpec {
    fn default() -> Self {
        Self {
            id_column: "ID".to_string(),
            organizer_code: "IOI".to_string(),
            score_column: ScoreColumnStrategy::default(),
            task_columns: Vec::new(),
        }
    }
}

impl From<&Config> for NormalizeSpec {
    fn from(config: &Config) -> Self {
        Self {
            id_column: config.id_column.clone(),
            organizer_code: config.organizer_code.clone(),
            score_column: ScoreColumnStrategy::new(config.score_keywords.clone()),
            task_columns: config.task_columns.clone(),
        }
    }
}

/// Scoreboard row normalizer.
pub struct Normalizer {
    spec: NormalizeSpec,
}

impl Normalizer {
    pub fn new(spec: NormalizeSpec) -> Self {
        Self { spec }
    }

    /// Returns whether a contestant ID belongs to an organizer account.
    pub fn is_organizer(&self, id: &str) -> bool {
        countries::code_of(id) == self.spec.organizer_code
    }

    /// Normalizes every row of the table.
    ///
    /// Organizer rows, rows without a country code and rows whose score is not
    /// a number are dropped. An empty result is not an error here; a missing
    /// identifier or score column is.
    pub fn normalize(
        &self,
        table: &ScoreboardTable,
    ) -> Result<Vec<ContestantRecord>, ScoreboardError> {
        let columns: Vec<String> = table.columns.iter().map(|c| c.trim().to_string()).collect();
        let find = |name: &str| columns.iter().position(|c| c == name.trim());
        let find_any = |names: &[&str]| names.iter().find_map(|n| find(*n));

        let id_idx = find(&self.spec.id_column)
            .ok_or_else(|| ScoreboardError::MissingIdColumn(self.spec.id_column.clone()))?;

        let (score_idx, score_name) = self.spec.score_column.select(&columns).ok_or_else(|| {
            ScoreboardError::NoScoreColumn { keywords: self.spec.score_column.keywords().to_vec() }
        })?;
        debug!("Using '{}' as the total score column", score_name);

        let first_idx = find_any(FIRST_NAME_COLUMNS);
        let last_idx = find_any(LAST_NAME_COLUMNS);
        let tasks: Vec<(String, usize)> = self
            .spec
            .task_columns
            .iter()
            .filter_map(|t| find(t).map(|i| (t.clone(), i)))
            .collect();

        let cell = |row: &[String], idx: Option<usize>| -> String {
            idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
        };

        let mut records = Vec::with_capacity(table.rows.len());
        let mut organizers = 0usize;

        for (source_row, row) in table.rows.iter().enumerate() {
            let id = cell(row, Some(id_idx));

            if self.is_organizer(&id) {
                organizers += 1;
                continue;
            }

            let code = countries::code_of(&id).to_string();
            if code.is_empty() {
                trace!("Dropping row {}: no country code", source_row);
                continue;
            }

            let Some(total_score) = row.get(score_idx).and_then(|s| coerce_score(s)) else {
                trace!("Dropping row {} ({}): score not numeric", source_row, id);
                continue;
            };

            let problem_scores = tasks
                .iter()
                .map(|(task, i)| ProblemScore {
                    task: task.clone(),
                    score: row.get(*i).and_then(|s| coerce_score(s)),
                })
                .collect();

            records.push(ContestantRecord {
                country: countries::resolve(&code),
                country_code: code,
                first_name: cell(row, first_idx),
                last_name: cell(row, last_idx),
                id,
                problem_scores,
                total_score,
                source_row,
            });
        }

        debug!(
            "Normalized {} of {} rows ({} organizer rows)",
            records.len(),
            table.rows.len(),
            organizers
        );

        Ok(records)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeSpec::default())
    }
}
