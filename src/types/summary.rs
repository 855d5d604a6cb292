use super::score::CanonicalHouseScore;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseSummary {
    pub house: String,
    pub rank: usize,
    pub entries: usize,
    /// Per-criterion averages; `average.total` is recomputed, never averaged from stored totals.
    pub average: CanonicalHouseScore,
}

impl HouseSummary {
    pub fn total(&self) -> f64 {
        self.average.total
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionFailure {
    pub collection: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsReport {
    pub event: String,
    pub category: String,
    /// Documents read across all score collections.
    pub documents: usize,
    /// Documents contributing at least one entry to this category.
    pub submissions: usize,
    pub summaries: Vec<HouseSummary>,
    pub winner: Option<String>,
    pub failures: Vec<CollectionFailure>,
}

impl ResultsReport {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
