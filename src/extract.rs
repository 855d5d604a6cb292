use crate::normalize::normalize;
use crate::store::StoredDocument;
use crate::types::score::{CanonicalHouseScore, ScoreEntry};
use serde_json::{Map, Value};
use tracing::debug;

/// Metadata keys that never name a house.
pub const RESERVED_KEYS: [&str; 5] = ["category", "judge", "createdAt", "timestamp", "judgeName"];

/// Additionally stripped before a whole document is scored as one house.
const FLAT_METADATA_KEYS: [&str; 2] = ["house", "judgeId"];

/// Keys holding a house-name to score mapping; older forms used `houses`.
const HOUSE_MAP_KEYS: [&str; 2] = ["scores", "houses"];

pub const UNKNOWN_HOUSE: &str = "Unknown";

/// A stored document, classified by the first matching layout.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScoreDocument<'a> {
    /// `{"scores": {"<house>": {...}}}` or `{"houses": {...}}`
    HousesMap(Vec<(&'a str, &'a Value)>),
    /// House names used directly as top-level keys.
    Legacy(Vec<(&'a str, &'a Value)>),
    /// One house per document, named by a `house` field.
    FlatHouse { house: String, body: Value },
    /// No house structure; scored as a single unnamed house.
    Empty(Value),
}

impl<'a> RawScoreDocument<'a> {
    pub fn classify(doc: &'a Value) -> Self {
        let Value::Object(map) = doc else {
            return Self::Empty(doc.clone());
        };

        for wrapper in HOUSE_MAP_KEYS {
            if let Some(Value::Object(scores)) = map.get(wrapper) {
                if !scores.is_empty() {
                    return Self::HousesMap(
                        scores
                            .iter()
                            .map(|(house, value)| (house.as_str(), value))
                            .collect(),
                    );
                }
            }
        }

        let house_like: Vec<_> = map
            .iter()
            .filter(|(key, value)| {
                !RESERVED_KEYS.contains(&key.as_str())
                    && matches!(value, Value::Object(inner) if !inner.is_empty())
            })
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        if !house_like.is_empty() {
            return Self::Legacy(house_like);
        }

        let body = Value::Object(strip_metadata(map));
        match house_name(map.get("house")) {
            Some(house) => Self::FlatHouse { house, body },
            None => Self::Empty(body),
        }
    }

    pub fn layout(&self) -> &'static str {
        match self {
            Self::HousesMap(_) => "houses-map",
            Self::Legacy(_) => "legacy",
            Self::FlatHouse { .. } => "flat-house",
            Self::Empty(_) => "empty",
        }
    }

    /// Normalized scores per house, in document order.
    pub fn house_scores(&self) -> Vec<(String, CanonicalHouseScore)> {
        match self {
            Self::HousesMap(houses) | Self::Legacy(houses) => houses
                .iter()
                .map(|(house, value)| (house.trim().to_string(), normalize(value)))
                .collect(),
            Self::FlatHouse { house, body } => vec![(house.clone(), normalize(body))],
            Self::Empty(body) => {
                let score = normalize(body);
                if score.is_zero() {
                    Vec::new()
                } else {
                    vec![(UNKNOWN_HOUSE.to_string(), score)]
                }
            }
        }
    }
}

pub fn extract_entries(collection: &str, doc: &StoredDocument) -> Vec<ScoreEntry> {
    let raw = RawScoreDocument::classify(&doc.body);
    let category = document_category(&doc.body);
    let judge = document_judge(&doc.body);
    let entries: Vec<_> = raw
        .house_scores()
        .into_iter()
        .map(|(house, score)| ScoreEntry {
            house,
            category: category.clone(),
            judge: judge.clone(),
            collection: collection.to_string(),
            document: doc.key.clone(),
            score,
        })
        .collect();
    debug!(
        collection,
        key = %doc.key,
        layout = raw.layout(),
        entries = entries.len(),
        "extracted document"
    );
    entries
}

pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

fn document_category(doc: &Value) -> String {
    doc.get("category")
        .and_then(Value::as_str)
        .map(normalize_category)
        .unwrap_or_default()
}

fn document_judge(doc: &Value) -> String {
    ["judge", "judgeName"]
        .iter()
        .filter_map(|key| doc.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn house_name(value: Option<&Value>) -> Option<String> {
    let name = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

fn strip_metadata(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| {
            !RESERVED_KEYS.contains(&key.as_str()) && !FLAT_METADATA_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
