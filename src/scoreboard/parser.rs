//! HTML parser for the scoreboard table.

use crate::error::ScoreboardError;
use crate::scoreboard::models::ScoreboardTable;
use crate::scoreboard::selectors;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

/// Where to find the table and which column identifies a contestant.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub table_id: String,
    pub id_column: String,
}

impl Default for TableSpec {
    fn default() -> Self {
        Self { table_id: "Scoreboard".to_string(), id_column: "ID".to_string() }
    }
}

/// Parses the scoreboard table out of a page.
///
/// Header names are trimmed and blank headers get a positional `Unnamed_{i}`
/// name. Every data row must have one cell per header; a mismatch is reported
/// rather than padded.
pub fn parse_scoreboard(html: &str, spec: &TableSpec) -> Result<ScoreboardTable, ScoreboardError> {
    let document = Html::parse_document(html);

    let table = document
        .select(&selectors::TABLE)
        .find(|t| t.value().id() == Some(spec.table_id.as_str()))
        .ok_or_else(|| {
            warn!("Table #{} not found in page", spec.table_id);
            ScoreboardError::TableNotFound(spec.table_id.clone())
        })?;

    let columns: Vec<String> = table
        .select(&selectors::HEADER_CELL)
        .enumerate()
        .map(|(i, th)| {
            let name = cell_text(th);
            if name.is_empty() {
                format!("Unnamed_{}", i)
            } else {
                name
            }
        })
        .collect();

    if !columns.iter().any(|c| c == spec.id_column.trim()) {
        warn!("Column '{}' missing from headers {:?}", spec.id_column, columns);
        return Err(ScoreboardError::MissingIdColumn(spec.id_column.clone()));
    }

    let mut rows = Vec::new();
    for (i, tr) in table.select(&selectors::BODY_ROW).enumerate() {
        let cells: Vec<String> = tr.select(&selectors::CELL).map(cell_text).collect();
        if cells.len() != columns.len() {
            return Err(ScoreboardError::RowShape {
                row: i,
                expected: columns.len(),
                found: cells.len(),
            });
        }
        rows.push(cells);
    }

    debug!("Parsed scoreboard: {} columns, {} rows", columns.len(), rows.len());

    Ok(ScoreboardTable { columns, rows })
}

fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
