//! Output formatting for scoreboard refreshes (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::error::{ErrorKind, ScoreboardError};
use crate::pipeline::Refresh;
use crate::ranking;
use crate::scoreboard::{ContestantStanding, CountryAggregate, FocusWindow, Snapshot};
use serde::Serialize;

const DEFAULT_TOP_COUNTRIES: usize = 50;
const DEGRADED_HEADLINE: &str = "Could not fetch or parse data. Retrying...";

#[derive(Serialize)]
struct DashboardView<'a> {
    contestants: usize,
    countries: usize,
    top_countries: &'a [CountryAggregate],
    focus_country: &'a str,
    window: &'a FocusWindow,
    standings: &'a [ContestantStanding],
}

#[derive(Serialize)]
struct ErrorView<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    kind: ErrorKind,
    message: String,
}

/// Formats refreshes for output.
pub struct Formatter {
    format: OutputFormat,
    top_countries: usize,
}

impl Formatter {
    /// Creates a new formatter showing the top 50 countries.
    pub fn new(format: OutputFormat) -> Self {
        Self { format, top_countries: DEFAULT_TOP_COUNTRIES }
    }

    /// Sets how many countries the top ranking shows.
    pub fn top_countries(mut self, n: usize) -> Self {
        self.top_countries = n;
        self
    }

    /// Formats one refresh.
    pub fn format_refresh(&self, refresh: &Refresh) -> String {
        match refresh {
            Refresh::Ready(snapshot) => self.format_snapshot(snapshot),
            Refresh::Degraded(err) => self.format_error(err),
        }
    }

    /// Formats a successful snapshot.
    pub fn format_snapshot(&self, snapshot: &Snapshot) -> String {
        match self.format {
            OutputFormat::Json => self.json_snapshot(snapshot),
            OutputFormat::Table => self.table_snapshot(snapshot),
            OutputFormat::Markdown => self.markdown_snapshot(snapshot),
            OutputFormat::Csv => self.csv_ranking(&snapshot.ranking),
        }
    }

    /// Formats a failed refresh.
    pub fn format_error(&self, err: &ScoreboardError) -> String {
        match self.format {
            OutputFormat::Json => {
                let view = ErrorView {
                    error: ErrorBody { code: err.code(), kind: err.kind(), message: err.to_string() },
                };
                serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => self.csv_header(),
            OutputFormat::Markdown => {
                format!("> **{}**\n>\n> `{}`: {}", DEGRADED_HEADLINE, err.code(), err)
            }
            OutputFormat::Table => format!("{}\n  [{}] {}", DEGRADED_HEADLINE, err.code(), err),
        }
    }

    // JSON formatting

    fn json_snapshot(&self, snapshot: &Snapshot) -> String {
        let view = DashboardView {
            contestants: snapshot.records.len(),
            countries: snapshot.ranking.len(),
            top_countries: ranking::top(&snapshot.ranking, self.top_countries),
            focus_country: &snapshot.focus_country,
            window: &snapshot.window,
            standings: &snapshot.standings,
        };
        serde_json::to_string_pretty(&view).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_snapshot(&self, snapshot: &Snapshot) -> String {
        let top = ranking::top(&snapshot.ranking, self.top_countries);
        let mut sections = Vec::new();

        sections.push(format!(
            "Top {} Countries by Total Score\n{}",
            top.len(),
            Self::table_ranking(top, None)
        ));

        sections.push(match &snapshot.window {
            FocusWindow::Ranked(window) => format!(
                "Countries Near {} in Ranking\n{}",
                window.country,
                Self::table_ranking(&window.entries, Some(window.country.as_str()))
            ),
            FocusWindow::NotRanked { country } => format!("{} not in the ranking.", country),
        });

        if !snapshot.standings.is_empty() {
            sections.push(format!(
                "{}: Problem-wise Scores and Ranks\n{}",
                snapshot.focus_country,
                Self::table_standings(&snapshot.standings)
            ));
        }

        sections.push(format!(
            "{} contestants from {} countries",
            snapshot.records.len(),
            snapshot.ranking.len()
        ));

        sections.join("\n\n")
    }

    fn table_ranking(entries: &[CountryAggregate], highlight: Option<&str>) -> String {
        let country_width = 26;
        let mut lines = Vec::new();

        lines.push(format!(
            "  {:>4}  {:<country_width$}  {:>10}  {:>11}",
            "Rank", "Country", "Total", "Contestants"
        ));
        lines.push(format!(
            "  {:->4}  {:-<country_width$}  {:->10}  {:->11}",
            "", "", "", ""
        ));

        for entry in entries {
            let marker = if highlight == Some(entry.country.as_str()) { ">" } else { " " };
            lines.push(format!(
                "{} {:>4}  {:<country_width$}  {:>10}  {:>11}",
                marker,
                entry.rank,
                truncate(&entry.country, country_width),
                entry.total_score,
                entry.contestants
            ));
        }

        lines.join("\n")
    }

    fn table_standings(standings: &[ContestantStanding]) -> String {
        let name_width = 24;
        let tasks = task_names(standings);
        let mut lines = Vec::new();

        let mut header = format!("  {:<name_width$}", "Contestant");
        for task in &tasks {
            header.push_str(&format!("  {:>10}", truncate(task, 10)));
        }
        header.push_str(&format!("  {:>8}  {:>9}", "Total", "Rank"));
        lines.push(header);

        for standing in standings {
            let name = if standing.name.is_empty() { &standing.id } else { &standing.name };
            let mut line = format!("  {:<name_width$}", truncate(name, name_width));
            for task in &tasks {
                line.push_str(&format!("  {:>10}", task_score(standing, task)));
            }
            line.push_str(&format!(
                "  {:>8}  {:>9}",
                optional_score(standing.total_score),
                rank_pair(standing)
            ));
            lines.push(line);
        }

        lines.push(String::new());
        lines.push("  Rank: scoreboard position / position among competitors".to_string());

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_snapshot(&self, snapshot: &Snapshot) -> String {
        let top = ranking::top(&snapshot.ranking, self.top_countries);
        let mut lines = Vec::new();

        lines.push(format!("## Top {} Countries by Total Score", top.len()));
        lines.push(String::new());
        Self::markdown_ranking(&mut lines, top, None);

        lines.push(String::new());
        match &snapshot.window {
            FocusWindow::Ranked(window) => {
                lines.push(format!("## Countries Near {} in Ranking", window.country));
                lines.push(String::new());
                Self::markdown_ranking(&mut lines, &window.entries, Some(window.country.as_str()));
            }
            FocusWindow::NotRanked { country } => {
                lines.push(format!("> {} not in the ranking.", country));
            }
        }

        if !snapshot.standings.is_empty() {
            let tasks = task_names(&snapshot.standings);

            lines.push(String::new());
            lines.push(format!("## {}: Problem-wise Scores and Ranks", snapshot.focus_country));
            lines.push(String::new());

            let mut header = "| Contestant |".to_string();
            let mut rule = "|------------|".to_string();
            for task in &tasks {
                header.push_str(&format!(" {} |", task));
                rule.push_str("------|");
            }
            header.push_str(" Total | Rank |");
            rule.push_str("-------|------|");
            lines.push(header);
            lines.push(rule);

            for standing in &snapshot.standings {
                let name = if standing.name.is_empty() { &standing.id } else { &standing.name };
                let mut row = format!("| {} |", name);
                for task in &tasks {
                    row.push_str(&format!(" {} |", task_score(standing, task)));
                }
                row.push_str(&format!(
                    " {} | {} |",
                    optional_score(standing.total_score),
                    rank_pair(standing)
                ));
                lines.push(row);
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "*{} contestants from {} countries*",
            snapshot.records.len(),
            snapshot.ranking.len()
        ));

        lines.join("\n")
    }

    fn markdown_ranking(
        lines: &mut Vec<String>,
        entries: &[CountryAggregate],
        highlight: Option<&str>,
    ) {
        lines.push("| Rank | Country | Total Score | Contestants |".to_string());
        lines.push("|------|---------|-------------|-------------|".to_string());

        for entry in entries {
            let country = if highlight == Some(entry.country.as_str()) {
                format!("**{}**", entry.country)
            } else {
                entry.country.clone()
            };
            lines.push(format!(
                "| {} | {} | {} | {} |",
                entry.rank, country, entry.total_score, entry.contestants
            ));
        }
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "rank,country,total_score,contestants".to_string()
    }

    fn csv_ranking(&self, entries: &[CountryAggregate]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for entry in entries {
            lines.push(format!(
                "{},{},{},{}",
                entry.rank,
                Self::csv_escape(&entry.country),
                entry.total_score,
                entry.contestants
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Task names in the order of the first standing that has any.
fn task_names(standings: &[ContestantStanding]) -> Vec<String> {
    standings
        .iter()
        .find(|s| !s.problem_scores.is_empty())
        .map(|s| s.problem_scores.iter().map(|p| p.task.clone()).collect())
        .unwrap_or_default()
}

fn task_score(standing: &ContestantStanding, task: &str) -> String {
    let score = standing.problem_scores.iter().find(|p| p.task == task).and_then(|p| p.score);
    optional_score(score)
}

fn optional_score(score: Option<f64>) -> String {
    score.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn rank_pair(standing: &ContestantStanding) -> String {
    format!("{}/{}", standing.overall_rank, standing.competitor_rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoreboard::{ContestantRecord, ProblemScore, Rank, RankingWindow};

    fn make_aggregate(rank: usize, country: &str, total: f64) -> CountryAggregate {
        CountryAggregate { rank, country: country.to_string(), total_score: total, contestants: 4 }
    }

    fn make_record(id: &str, country: &str, total: f64) -> ContestantRecord {
        ContestantRecord {
            id: id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            country_code: id[..3].to_string(),
            country: country.to_string(),
            problem_scores: Vec::new(),
            total_score: total,
            source_row: 0,
        }
    }

    fn make_standing(id: &str, name: &str, overall: Rank, competitor: Rank) -> ContestantStanding {
        ContestantStanding {
            id: id.to_string(),
            name: name.to_string(),
            country: "Pakistan".to_string(),
            problem_scores: vec![
                ProblemScore { task: "souvenirs".into(), score: Some(100.0) },
                ProblemScore { task: "triples".into(), score: Some(35.5) },
                ProblemScore { task: "worldmap".into(), score: None },
            ],
            total_score: Some(135.5),
            overall_rank: overall,
            competitor_rank: competitor,
        }
    }

    fn make_snapshot() -> Snapshot {
        let ranking = vec![
            make_aggregate(1, "China", 1200.0),
            make_aggregate(2, "Pakistan", 600.0),
            make_aggregate(3, "Bosnia and Herzegovina", 450.5),
        ];
        Snapshot {
            records: vec![
                make_record("CHN01", "China", 1200.0),
                make_record("PAK01", "Pakistan", 600.0),
                make_record("BIH01", "Bosnia and Herzegovina", 450.5),
            ],
            window: FocusWindow::Ranked(RankingWindow {
                country: "Pakistan".into(),
                rank: 2,
                entries: ranking.clone(),
            }),
            ranking,
            focus_country: "Pakistan".into(),
            standings: vec![
                make_standing("PAK01", "Sana Ali", Rank::Known(12), Rank::Known(9)),
                make_standing("PAK04", "", Rank::Known(40), Rank::Unknown),
            ],
        }
    }

    // Table format tests

    #[test]
    fn test_table_snapshot_sections() {
        let output = Formatter::new(OutputFormat::Table).format_snapshot(&make_snapshot());

        assert!(output.contains("Top 3 Countries by Total Score"));
        assert!(output.contains("Countries Near Pakistan in Ranking"));
        assert!(output.contains("Pakistan: Problem-wise Scores and Ranks"));
        assert!(output.contains("China"));
        assert!(output.contains("1200"));
        assert!(output.contains("450.5"));
        assert!(output.contains("3 contestants from 3 countries"));
    }

    #[test]
    fn test_table_highlights_focus_country() {
        let output = Formatter::new(OutputFormat::Table).format_snapshot(&make_snapshot());

        assert!(output.lines().any(|l| l.starts_with(">") && l.contains("Pakistan")));
        assert!(!output.lines().any(|l| l.starts_with(">") && l.contains("China")));
    }

    #[test]
    fn test_table_standings_ranks() {
        let output = Formatter::new(OutputFormat::Table).format_snapshot(&make_snapshot());

        assert!(output.contains("Sana Ali"));
        assert!(output.contains("12/9"));
        assert!(output.contains("40/?"));
        // contestants without a name fall back to their ID
        assert!(output.contains("PAK04"));
        assert!(output.contains("souvenirs"));
        assert!(output.contains("135.5"));
    }

    #[test]
    fn test_table_top_limit() {
        let formatter = Formatter::new(OutputFormat::Table).top_countries(2);
        let output = formatter.format_snapshot(&make_snapshot());
        assert!(output.contains("Top 2 Countries by Total Score"));
    }

    #[test]
    fn test_table_not_ranked_notice() {
        let mut snapshot = make_snapshot();
        snapshot.window = FocusWindow::NotRanked { country: "Pakistan".into() };
        snapshot.standings.clear();

        let output = Formatter::new(OutputFormat::Table).format_snapshot(&snapshot);
        assert!(output.contains("Pakistan not in the ranking."));
        assert!(!output.contains("Countries Near"));
        assert!(!output.contains("Problem-wise"));
    }

    #[test]
    fn test_table_degraded() {
        let refresh = Refresh::Degraded(ScoreboardError::TableNotFound("Scoreboard".into()));
        let output = Formatter::new(OutputFormat::Table).format_refresh(&refresh);

        assert!(output.starts_with(DEGRADED_HEADLINE));
        assert!(output.contains("[table_not_found]"));
    }

    // JSON format tests

    #[test]
    fn test_json_snapshot() {
        let formatter = Formatter::new(OutputFormat::Json).top_countries(2);
        let output = formatter.format_snapshot(&make_snapshot());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["contestants"], 3);
        assert_eq!(value["countries"], 3);
        assert_eq!(value["top_countries"].as_array().unwrap().len(), 2);
        assert_eq!(value["focus_country"], "Pakistan");
        assert_eq!(value["window"]["status"], "ranked");
        assert_eq!(value["window"]["rank"], 2);
        assert_eq!(value["standings"][0]["overall_rank"]["known"], 12);
        assert_eq!(value["standings"][1]["competitor_rank"], "unknown");
    }

    #[test]
    fn test_json_degraded() {
        let refresh = Refresh::Degraded(ScoreboardError::Fetch("timed out".into()));
        let output = Formatter::new(OutputFormat::Json).format_refresh(&refresh);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["error"]["code"], "fetch_failed");
        assert_eq!(value["error"]["kind"], "fetch");
        assert!(value["error"]["message"].as_str().unwrap().contains("timed out"));
    }

    // Markdown format tests

    #[test]
    fn test_markdown_snapshot() {
        let output = Formatter::new(OutputFormat::Markdown).format_snapshot(&make_snapshot());

        assert!(output.contains("## Top 3 Countries by Total Score"));
        assert!(output.contains("| Rank | Country | Total Score | Contestants |"));
        assert!(output.contains("| 2 | **Pakistan** | 600 | 4 |"));
        assert!(output.contains("| Contestant | souvenirs | triples | worldmap | Total | Rank |"));
        assert!(output.contains("| Sana Ali | 100 | 35.5 | - | 135.5 | 12/9 |"));
        assert!(output.contains("*3 contestants from 3 countries*"));
    }

    #[test]
    fn test_markdown_degraded() {
        let refresh = Refresh::Degraded(ScoreboardError::NoRecords(4));
        let output = Formatter::new(OutputFormat::Markdown).format_refresh(&refresh);

        assert!(output.contains(DEGRADED_HEADLINE));
        assert!(output.contains("`no_records`"));
    }

    // CSV format tests

    #[test]
    fn test_csv_ranking() {
        let output = Formatter::new(OutputFormat::Csv).format_snapshot(&make_snapshot());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "rank,country,total_score,contestants");
        assert_eq!(lines[1], "1,China,1200,4");
        assert_eq!(lines[3], "3,Bosnia and Herzegovina,450.5,4");
    }

    #[test]
    fn test_csv_degraded_is_header_only() {
        let refresh = Refresh::Degraded(ScoreboardError::EmptyScoreboard);
        let output = Formatter::new(OutputFormat::Csv).format_refresh(&refresh);
        assert_eq!(output, "rank,country,total_score,contestants");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("Korea, Republic of"), "\"Korea, Republic of\"");
        assert_eq!(Formatter::csv_escape("with\"quote"), "\"with\"\"quote\"");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Pakistan", 10), "Pakistan");
        assert_eq!(truncate("Bosnia and Herzegovina", 10), "Bosnia ...");
    }
}
