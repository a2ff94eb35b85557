//! Detection of the final score column.
//!
//! Scoreboard deployments label the aggregate column differently ("Day 2",
//! "Score", "Global"). The rightmost header containing one of the keywords is
//! the running total.

/// Selects the last header containing any of a set of keywords.
#[derive(Debug, Clone)]
pub struct ScoreColumnStrategy {
    keywords: Vec<String>,
}

impl ScoreColumnStrategy {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the index and name of the score column, if any header matches.
    pub fn select<'a>(&self, columns: &'a [String]) -> Option<(usize, &'a str)> {
        columns
            .iter()
            .enumerate()
            .rev()
            .find(|(_, name)| self.matches(name))
            .map(|(i, name)| (i, name.as_str()))
    }

    fn matches(&self, column: &str) -> bool {
        self.keywords.iter().any(|k| !k.is_empty() && column.contains(k.as_str()))
    }
}

impl Default for ScoreColumnStrategy {
    fn default() -> Self {
        Self::new(vec!["Day".to_string(), "Score".to_string(), "Global".to_string()])
    }
}

/// Parses score text; blanks, words like "DNS" and non-finite values give `None`.
pub fn coerce_score(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
