pub mod gate;

use crate::error::{MarksError, Result};
use crate::extract::normalize_category;
use crate::store::{validate_key, DocumentStore};
use crate::types::config::{CriterionConfig, MarksConfig};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub judge_id: String,
    pub judge_name: String,
    pub category: String,
    /// `{"<house>": {"<criterion key>": mark}}`
    pub marks: Value,
}

/// One document per judge per category.
pub fn document_key(category: &str, judge_id: &str) -> String {
    format!("{category}_{judge_id}")
}

/// Validates marks and stores them; a second submission for the same judge and category is rejected.
pub fn submit(
    store: &dyn DocumentStore,
    config: &MarksConfig,
    request: &SubmissionRequest,
) -> Result<String> {
    validate_judge(&request.judge_id, &request.judge_name)?;
    let category = resolve_category(config, &request.category)?;
    gate::ensure_open(store, config, &request.judge_id, &request.judge_name)?;

    let scores = build_scores(config, &request.marks)?;
    let payload = json!({
        "judge": request.judge_name.trim(),
        "judgeId": request.judge_id,
        "category": category,
        "scores": scores,
        "timestamp": Utc::now().to_rfc3339(),
    });

    let key = document_key(&category, &request.judge_id);
    store.create(&config.store.scores_collection, &key, &payload)?;
    info!(key = %key, "stored submission");
    Ok(key)
}

pub(crate) fn validate_judge(judge_id: &str, judge_name: &str) -> Result<()> {
    if validate_key(judge_id).is_err() {
        return Err(MarksError::InvalidSubmission(format!(
            "judge id {judge_id:?} may only contain letters, digits, '_', '-' and '.'"
        )));
    }
    if judge_name.trim().is_empty() {
        return Err(MarksError::InvalidSubmission(
            "judge name is required".to_string(),
        ));
    }
    Ok(())
}

fn resolve_category(config: &MarksConfig, raw: &str) -> Result<String> {
    let category = normalize_category(raw);
    if category.is_empty() {
        return Err(MarksError::MissingCategory);
    }
    if validate_key(&category).is_err() || !config.has_category(&category) {
        return Err(MarksError::UnknownCategory(category));
    }
    Ok(category)
}

/// Per-house records in configured house order, each with its computed total.
fn build_scores(config: &MarksConfig, marks: &Value) -> Result<Map<String, Value>> {
    let Value::Object(houses) = marks else {
        return Err(MarksError::InvalidSubmission(
            "marks must be an object keyed by house".to_string(),
        ));
    };
    if let Some(unknown) = houses
        .keys()
        .find(|house| !config.event.houses.iter().any(|known| known == house.trim()))
    {
        return Err(MarksError::UnknownHouse(unknown.clone()));
    }

    let mut scores = Map::new();
    for house in &config.event.houses {
        let given = houses
            .iter()
            .find(|(name, _)| name.trim() == house)
            .map(|(_, value)| value);
        let mut record = Map::new();
        let mut total = 0u32;
        for criterion in &config.criteria {
            let mark = read_mark(house, criterion, given)?;
            total += mark;
            record.insert(criterion.key.clone(), json!(mark));
        }
        record.insert("total".to_string(), json!(total));
        scores.insert(house.clone(), Value::Object(record));
    }
    Ok(scores)
}

fn read_mark(house: &str, criterion: &CriterionConfig, given: Option<&Value>) -> Result<u32> {
    let missing = || MarksError::MissingMark {
        house: house.to_string(),
        criterion: criterion.label.clone(),
    };
    let value = given
        .and_then(|record| record.get(&criterion.key))
        .ok_or_else(missing)?;
    let mark = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    match mark {
        Some(mark) if (1..=u64::from(criterion.max)).contains(&mark) => Ok(mark as u32),
        _ => Err(MarksError::MarkOutOfRange {
            house: house.to_string(),
            criterion: criterion.label.clone(),
            value: value.to_string(),
            max: criterion.max,
        }),
    }
}
