//! Contestant filtering used to pick the focus subset.

pub mod country;

use crate::scoreboard::ContestantRecord;

pub use country::CountryFilter;

/// Trait for filtering contestant records.
pub trait Filter: Send + Sync {
    /// Returns true if the record passes the filter.
    fn matches(&self, record: &ContestantRecord) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &ContestantRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Returns the matching records, keeping their order.
    pub fn select<'a>(&self, records: &'a [ContestantRecord]) -> Vec<&'a ContestantRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds a country filter.
    pub fn country(mut self, country: Option<&str>) -> Self {
        if let Some(country) = country.filter(|c| !c.trim().is_empty()) {
            self.chain.add(CountryFilter::new(country));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
