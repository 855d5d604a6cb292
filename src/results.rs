use crate::aggregate::{self, ranking, OVERALL};
use crate::extract::{extract_entries, normalize_category};
use crate::store::DocumentStore;
use crate::types::config::MarksConfig;
use crate::types::score::ScoreEntry;
use crate::types::summary::{CollectionFailure, ResultsReport};
use std::collections::BTreeSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct LoadedEntries {
    pub documents: usize,
    pub entries: Vec<ScoreEntry>,
    pub failures: Vec<CollectionFailure>,
}

/// Reads every score collection; a collection that cannot be read contributes nothing.
pub fn load_entries(store: &dyn DocumentStore, config: &MarksConfig) -> LoadedEntries {
    let mut loaded = LoadedEntries::default();
    for collection in config.score_collections() {
        match store.list(collection) {
            Ok(documents) => {
                loaded.documents += documents.len();
                for document in &documents {
                    loaded.entries.extend(extract_entries(collection, document));
                }
            }
            Err(error) => {
                warn!(collection, %error, "collection unavailable; continuing without it");
                loaded.failures.push(CollectionFailure {
                    collection: collection.to_string(),
                    message: error.to_string(),
                });
            }
        }
    }
    info!(
        documents = loaded.documents,
        entries = loaded.entries.len(),
        "loaded score documents"
    );
    loaded
}

pub fn build_report(loaded: &LoadedEntries, category_filter: &str) -> ResultsReport {
    let category = match normalize_category(category_filter) {
        filter if aggregate::is_overall(&filter) => OVERALL.to_string(),
        filter => filter,
    };
    let submissions = aggregate::select(&loaded.entries, &category)
        .into_iter()
        .map(|entry| (entry.collection.as_str(), entry.document.as_str()))
        .collect::<BTreeSet<_>>()
        .len();
    let summaries = aggregate::aggregate(&loaded.entries, &category);
    let winner = ranking::winner(&summaries).map(|summary| summary.house.clone());

    ResultsReport {
        event: String::new(),
        category,
        documents: loaded.documents,
        submissions,
        summaries,
        winner,
        failures: loaded.failures.clone(),
    }
}

pub fn results(
    store: &dyn DocumentStore,
    config: &MarksConfig,
    category_filter: &str,
) -> ResultsReport {
    let mut report = build_report(&load_entries(store, config), category_filter);
    report.event = config.event.name.clone();
    report
}
