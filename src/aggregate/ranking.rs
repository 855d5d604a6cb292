use crate::types::summary::HouseSummary;
use std::cmp::Ordering;

/// Highest total first; equal totals fall back to house name ascending.
pub fn rank(mut summaries: Vec<HouseSummary>) -> Vec<HouseSummary> {
    summaries.sort_by(compare);
    for (position, summary) in summaries.iter_mut().enumerate() {
        summary.rank = position + 1;
    }
    summaries
}

fn compare(left: &HouseSummary, right: &HouseSummary) -> Ordering {
    right
        .total()
        .total_cmp(&left.total())
        .then_with(|| left.house.cmp(&right.house))
}

pub fn winner(ranked: &[HouseSummary]) -> Option<&HouseSummary> {
    ranked.iter().find(|summary| summary.rank == 1)
}
