pub mod ranking;

use crate::extract::normalize_category;
use crate::types::score::{CanonicalField, CanonicalHouseScore, ScoreEntry};
use crate::types::summary::HouseSummary;

/// Category filter value that selects every entry.
pub const OVERALL: &str = "overall";

pub fn aggregate(entries: &[ScoreEntry], category_filter: &str) -> Vec<HouseSummary> {
    let summaries = group_by_house(select(entries, category_filter))
        .into_iter()
        .map(|(house, members)| summarize(house, &members))
        .collect();
    ranking::rank(summaries)
}

/// Entries in the requested category; `""` and `"overall"` select everything.
pub fn select<'a>(entries: &'a [ScoreEntry], category_filter: &str) -> Vec<&'a ScoreEntry> {
    let filter = normalize_category(category_filter);
    entries
        .iter()
        .filter(|entry| matches_category(entry, &filter))
        .collect()
}

pub fn is_overall(filter: &str) -> bool {
    filter.is_empty() || filter == OVERALL
}

fn matches_category(entry: &ScoreEntry, filter: &str) -> bool {
    is_overall(filter) || normalize_category(&entry.category) == filter
}

/// Groups in first-appearance order.
fn group_by_house(entries: Vec<&ScoreEntry>) -> Vec<(String, Vec<&ScoreEntry>)> {
    let mut groups: Vec<(String, Vec<&ScoreEntry>)> = Vec::new();
    for entry in entries {
        let house = entry.house.trim();
        match groups.iter_mut().find(|(name, _)| name == house) {
            Some((_, members)) => members.push(entry),
            None => groups.push((house.to_string(), vec![entry])),
        }
    }
    groups
}

fn summarize(house: String, members: &[&ScoreEntry]) -> HouseSummary {
    let count = members.len();
    let mut average = CanonicalHouseScore::default();
    for field in CanonicalField::CRITERIA {
        let sum: f64 = members.iter().map(|entry| entry.score.get(field)).sum();
        *average.slot_mut(field) = mean(sum, count);
    }

    // Entries carrying only a total have nothing to recompute from.
    let total_only: f64 = members
        .iter()
        .filter(|entry| entry.score.criteria_sum() == 0.0)
        .map(|entry| entry.score.total)
        .sum();
    average.total = average.criteria_sum() + mean(total_only, count);

    HouseSummary {
        house,
        rank: 0,
        entries: count,
        average,
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
