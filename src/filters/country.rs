//! Country filter.

use super::Filter;
use crate::scoreboard::ContestantRecord;

/// Keeps contestants of one country, matched by display name or code.
pub struct CountryFilter {
    country: String,
}

impl CountryFilter {
    /// Creates a new country filter.
    pub fn new(country: impl Into<String>) -> Self {
        Self { country: country.into().trim().to_string() }
    }
}

impl Filter for CountryFilter {
    fn matches(&self, record: &ContestantRecord) -> bool {
        record.country == self.country || record.country_code == self.country
    }

    fn description(&self) -> String {
        format!("Country: {}", self.country)
    }
}
