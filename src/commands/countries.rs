//! Lists the delegation codes the scoreboard resolves to country names.

use crate::config::OutputFormat;
use crate::scoreboard::countries::COUNTRY_CODES;
use serde::Serialize;

#[derive(Serialize)]
struct CountryEntry {
    code: &'static str,
    name: &'static str,
}

/// Prints the code to name lookup table.
pub struct CountriesCommand {
    format: OutputFormat,
}

impl CountriesCommand {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the lookup table sorted by code.
    pub fn execute(&self) -> String {
        let mut entries: Vec<CountryEntry> =
            COUNTRY_CODES.iter().map(|&(code, name)| CountryEntry { code, name }).collect();
        entries.sort_by_key(|e| e.code);

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["code,name".to_string()];
                lines.extend(entries.iter().map(|e| format!("{},{}", e.code, e.name)));
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines =
                    vec!["| Code | Country |".to_string(), "|------|---------|".to_string()];
                lines.extend(entries.iter().map(|e| format!("| {} | {} |", e.code, e.name)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    "Known delegation codes:\n".to_string(),
                    format!("{:<6} {:<30}", "Code", "Country"),
                    format!("{:-<6} {:-<30}", "", ""),
                ];
                lines.extend(entries.iter().map(|e| format!("{:<6} {:<30}", e.code, e.name)));
                lines.join("\n")
            }
        }
    }
}
