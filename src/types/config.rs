use crate::error::MarksError;
use crate::normalize::classify::classify;
use crate::types::score::CanonicalField;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Deserialize)]
pub struct MarksConfig {
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default = "default_criteria")]
    pub criteria: Vec<CriterionConfig>,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_event_name")]
    pub name: String,
    #[serde(default = "default_houses")]
    pub houses: Vec<String>,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_max_judges")]
    pub max_judges: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: default_event_name(),
            houses: default_houses(),
            categories: default_categories(),
            max_judges: default_max_judges(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CriterionConfig {
    pub key: String,
    pub label: String,
    pub max: u32,
}

impl CriterionConfig {
    fn new(key: &str, label: &str, max: u32) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            max,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_scores_collection")]
    pub scores_collection: String,
    #[serde(default = "default_legacy_collections")]
    pub legacy_collections: Vec<String>,
    #[serde(default = "default_judges_collection")]
    pub judges_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scores_collection: default_scores_collection(),
            legacy_collections: default_legacy_collections(),
            judges_collection: default_judges_collection(),
        }
    }
}

fn default_event_name() -> String {
    "House Inspection".to_string()
}

fn default_houses() -> Vec<String> {
    ["Aravali", "Nilgiri", "Shivalik", "Udaigiri"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_categories() -> Vec<String> {
    vec!["boys".to_string(), "girls".to_string()]
}

fn default_max_judges() -> u32 {
    3
}

fn default_criteria() -> Vec<CriterionConfig> {
    vec![
        CriterionConfig::new("decoration", "Display House Decoration", 20),
        CriterionConfig::new("items", "Display Items & Belongings", 20),
        CriterionConfig::new("dorm", "Cleanliness Inside Dorm", 10),
        CriterionConfig::new("fanTube", "Status of Fan & Tube", 10),
        CriterionConfig::new("footpath", "Cleanliness of Surrounding Footpath", 10),
        CriterionConfig::new("grass", "Cleanliness of Grass & Bushes", 10),
        CriterionConfig::new("surrounding", "Cleanliness of Surrounding", 20),
    ]
}

fn default_scores_collection() -> String {
    "scores".to_string()
}

fn default_legacy_collections() -> Vec<String> {
    vec!["judges_scores".to_string()]
}

fn default_judges_collection() -> String {
    "judges".to_string()
}

impl Default for MarksConfig {
    fn default() -> Self {
        Self {
            event: EventConfig::default(),
            criteria: default_criteria(),
            store: StoreConfig::default(),
        }
    }
}

impl MarksConfig {
    /// Scores collection first, then legacy collections, without duplicates.
    pub fn score_collections(&self) -> Vec<&str> {
        let mut collections = vec![self.store.scores_collection.as_str()];
        for legacy in &self.store.legacy_collections {
            if !collections.contains(&legacy.as_str()) {
                collections.push(legacy);
            }
        }
        collections
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.event.categories.is_empty()
            || self
                .event
                .categories
                .iter()
                .any(|known| known.trim().eq_ignore_ascii_case(category))
    }

    pub fn validate(&self) -> Result<(), MarksError> {
        if self.event.houses.is_empty() {
            return Err(MarksError::ConfigInvalid(
                "event.houses must list at least one house".to_string(),
            ));
        }
        let mut houses = HashSet::new();
        for house in &self.event.houses {
            let house = house.trim();
            if house.is_empty() {
                return Err(MarksError::ConfigInvalid(
                    "event.houses entries must be non-empty".to_string(),
                ));
            }
            if !houses.insert(house) {
                return Err(MarksError::ConfigInvalid(format!(
                    "event.houses contains duplicate house: {house}"
                )));
            }
        }

        if self
            .event
            .categories
            .iter()
            .any(|category| category.trim().is_empty())
        {
            return Err(MarksError::ConfigInvalid(
                "event.categories entries must be non-empty".to_string(),
            ));
        }

        if self.event.max_judges == 0 {
            return Err(MarksError::ConfigInvalid(
                "event.max_judges must be greater than 0".to_string(),
            ));
        }

        if self.criteria.is_empty() {
            return Err(MarksError::ConfigInvalid(
                "at least one [[criteria]] entry is required".to_string(),
            ));
        }
        validate_criteria(&self.criteria)?;

        for collection in self
            .score_collections()
            .into_iter()
            .chain([self.store.judges_collection.as_str()])
        {
            crate::store::validate_key(collection).map_err(|_| {
                MarksError::ConfigInvalid(format!("invalid collection name: {collection:?}"))
            })?;
        }

        Ok(())
    }
}

/// Every criterion must land in its own canonical field, or results would merge criteria.
fn validate_criteria(criteria: &[CriterionConfig]) -> Result<(), MarksError> {
    let mut claimed = HashMap::<CanonicalField, &str>::new();
    for criterion in criteria {
        if criterion.max == 0 {
            return Err(MarksError::ConfigInvalid(format!(
                "criteria.{} max must be greater than 0",
                criterion.key
            )));
        }
        let field = match classify(&criterion.key) {
            Some(CanonicalField::Total) | None => {
                return Err(MarksError::ConfigInvalid(format!(
                    "criteria key '{}' does not match a score category",
                    criterion.key
                )));
            }
            Some(field) => field,
        };
        if let Some(existing) = claimed.insert(field, criterion.key.as_str()) {
            return Err(MarksError::ConfigInvalid(format!(
                "criteria keys '{existing}' and '{}' both map to {}",
                criterion.key,
                field.as_str()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: MarksConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config.event.houses.len(), 4);
        assert_eq!(config.event.max_judges, 3);
        assert_eq!(config.criteria.len(), 7);
        assert_eq!(config.store.scores_collection, "scores");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let config: MarksConfig = toml::from_str(
            r#"
[event]
name = "Sports Week"
houses = ["Red", "Blue"]
categories = ["junior"]
max_judges = 5

[[criteria]]
key = "decoration"
label = "Decoration"
max = 10

[[criteria]]
key = "grass"
label = "Lawn"
max = 5

[store]
scores_collection = "marks"
legacy_collections = []
"#,
        )
        .expect("config should parse");

        assert_eq!(config.event.houses, ["Red", "Blue"]);
        assert_eq!(config.criteria[1].max, 5);
        assert_eq!(config.score_collections(), ["marks"]);
        assert_eq!(config.store.judges_collection, "judges");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn score_collections_deduplicates_legacy_names() {
        let mut config = MarksConfig::default();
        config.store.legacy_collections = vec!["scores".to_string(), "old".to_string()];
        assert_eq!(config.score_collections(), ["scores", "old"]);
    }

    #[test]
    fn has_category_is_case_insensitive() {
        let config = MarksConfig::default();
        assert!(config.has_category("boys"));
        assert!(config.has_category("GIRLS"));
        assert!(!config.has_category("staff"));
    }

    #[test]
    fn validate_rejects_duplicate_houses() {
        let mut config = MarksConfig::default();
        config.event.houses = vec!["Aravali".to_string(), " Aravali ".to_string()];
        assert!(matches!(
            config.validate(),
            Err(MarksError::ConfigInvalid(message)) if message.contains("duplicate")
        ));
    }

    #[test]
    fn validate_rejects_unclassifiable_criterion() {
        let mut config = MarksConfig::default();
        config.criteria.push(CriterionConfig::new("punctuality", "Punctuality", 5));
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_criteria_sharing_a_field() {
        let mut config = MarksConfig::default();
        config.criteria = vec![
            CriterionConfig::new("fan", "Fans", 5),
            CriterionConfig::new("tube", "Tubes", 5),
        ];
        assert!(matches!(
            config.validate(),
            Err(MarksError::ConfigInvalid(message)) if message.contains("fanTube")
        ));
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = MarksConfig::default();
        config.event.max_judges = 0;
        assert!(config.validate().is_err());

        let mut config = MarksConfig::default();
        config.criteria[0].max = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unsafe_collection_names() {
        let mut config = MarksConfig::default();
        config.store.judges_collection = "../judges".to_string();
        assert!(config.validate().is_err());
    }
}
