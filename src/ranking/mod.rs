//! Country aggregation and contestant ranking.

use crate::scoreboard::countries;
use crate::scoreboard::models::{
    ContestantRecord, ContestantStanding, CountryAggregate, FocusWindow, Rank, RankingWindow,
};
use std::collections::HashMap;
use tracing::debug;

/// Sums scores per country and ranks countries by that sum.
///
/// Higher totals rank first; equal totals are ordered alphabetically by
/// country name. Ranks are 1-based.
pub fn aggregate(records: &[ContestantRecord]) -> Vec<CountryAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<CountryAggregate> = Vec::new();

    for record in records {
        let slot = *index.entry(record.country.as_str()).or_insert_with(|| {
            groups.push(CountryAggregate {
                rank: 0,
                country: record.country.clone(),
                total_score: 0.0,
                contestants: 0,
            });
            groups.len() - 1
        });
        groups[slot].total_score += record.total_score;
        groups[slot].contestants += 1;
    }

    groups.sort_by(|a, b| {
        b.total_score.total_cmp(&a.total_score).then_with(|| a.country.cmp(&b.country))
    });

    for (i, group) in groups.iter_mut().enumerate() {
        group.rank = i + 1;
    }

    groups
}

/// Returns at most the first `n` entries of a ranking.
pub fn top(ranking: &[CountryAggregate], n: usize) -> &[CountryAggregate] {
    &ranking[..n.min(ranking.len())]
}

/// Returns the entries ranked within `radius` places of `country`.
pub fn window(ranking: &[CountryAggregate], country: &str, radius: usize) -> FocusWindow {
    let Some(rank) = ranking.iter().find(|a| a.country == country).map(|a| a.rank) else {
        debug!("{} is not in the ranking", country);
        return FocusWindow::NotRanked { country: country.to_string() };
    };

    let low = rank.saturating_sub(radius);
    let high = rank.saturating_add(radius);
    let entries = ranking.iter().filter(|a| a.rank >= low && a.rank <= high).cloned().collect();

    FocusWindow::Ranked(RankingWindow { country: country.to_string(), rank, entries })
}

/// Orders competing contestants by total score, highest first.
///
/// The sort is stable, so equal scores keep their scoreboard order.
pub fn competitor_order(records: &[ContestantRecord]) -> Vec<&ContestantRecord> {
    let mut ordered: Vec<&ContestantRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    ordered
}

/// Computes both ranks for each contestant of interest.
///
/// `parsed_ids` is the identifier column of the full table as published,
/// organizer rows included; the overall rank is a position in it. The
/// competitor rank is a position in [`competitor_order`]. A contestant missing
/// from either list gets [`Rank::Unknown`] for that rank.
pub fn dual_ranks(
    parsed_ids: &[String],
    records: &[ContestantRecord],
    subset_ids: &[String],
) -> Vec<ContestantStanding> {
    let mut overall: HashMap<&str, usize> = HashMap::new();
    for (i, id) in parsed_ids.iter().enumerate() {
        overall.entry(id.as_str()).or_insert(i + 1);
    }

    let mut competitor: HashMap<&str, (usize, &ContestantRecord)> = HashMap::new();
    for (i, record) in competitor_order(records).into_iter().enumerate() {
        competitor.entry(record.id.as_str()).or_insert((i + 1, record));
    }

    subset_ids
        .iter()
        .map(|id| {
            let overall_rank = overall.get(id.as_str()).map_or(Rank::Unknown, |&n| Rank::Known(n));

            match competitor.get(id.as_str()) {
                Some(&(n, record)) => ContestantStanding {
                    id: id.clone(),
                    name: record.full_name(),
                    country: record.country.clone(),
                    problem_scores: record.problem_scores.clone(),
                    total_score: Some(record.total_score),
                    overall_rank,
                    competitor_rank: Rank::Known(n),
                },
                None => {
                    debug!("{} has no competitor rank", id);
                    ContestantStanding {
                        id: id.clone(),
                        name: String::new(),
                        country: countries::resolve(countries::code_of(id)),
                        problem_scores: Vec::new(),
                        total_score: None,
                        overall_rank,
                        competitor_rank: Rank::Unknown,
                    }
                }
            }
        })
        .collect()
}

/// Ranking settings for the focus views.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    pub focus_country: String,
    pub window_radius: usize,
}

/// All ranking views of one refresh.
#[derive(Debug, Clone)]
pub struct Rankings {
    pub ranking: Vec<CountryAggregate>,
    pub window: FocusWindow,
    pub standings: Vec<ContestantStanding>,
}

impl RankingEngine {
    pub fn new(focus_country: impl Into<String>, window_radius: usize) -> Self {
        Self { focus_country: focus_country.into(), window_radius }
    }

    /// Builds the country ranking, the focus window and the subset's dual ranks.
    pub fn evaluate(
        &self,
        parsed_ids: &[String],
        records: &[ContestantRecord],
        subset_ids: &[String],
    ) -> Rankings {
        let ranking = aggregate(records);
        let window = window(&ranking, &self.focus_country, self.window_radius);
        let standings = dual_ranks(parsed_ids, records, subset_ids);

        debug!("Ranked {} countries, {} focus contestants", ranking.len(), standings.len());

        Rankings { ranking, window, standings }
    }
}
