use crate::error::{MarksError, Result};
use crate::store::DocumentStore;
use crate::types::config::MarksConfig;
use chrono::Utc;
use serde_json::json;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered,
    AlreadyRegistered,
}

/// A judge counts as registered by id, or by display name for judges re-registered under a new id.
pub fn is_registered(
    store: &dyn DocumentStore,
    config: &MarksConfig,
    judge_id: &str,
    judge_name: &str,
) -> Result<bool> {
    let collection = config.store.judges_collection.as_str();
    if store.get(collection, judge_id)?.is_some() {
        return Ok(true);
    }
    Ok(!store
        .scan_where(collection, "name", &json!(judge_name))?
        .is_empty())
}

/// Once the panel is full, only its members may register or submit.
pub fn ensure_open(
    store: &dyn DocumentStore,
    config: &MarksConfig,
    judge_id: &str,
    judge_name: &str,
) -> Result<()> {
    let registered = store.list(&config.store.judges_collection)?.len();
    let limit = config.event.max_judges;
    if registered >= limit as usize && !is_registered(store, config, judge_id, judge_name)? {
        return Err(MarksError::JudgeLimitReached(limit));
    }
    Ok(())
}

pub fn register(
    store: &dyn DocumentStore,
    config: &MarksConfig,
    judge_id: &str,
    judge_name: &str,
) -> Result<Registration> {
    super::validate_judge(judge_id, judge_name)?;
    ensure_open(store, config, judge_id, judge_name)?;

    let collection = config.store.judges_collection.as_str();
    let body = json!({
        "name": judge_name.trim(),
        "createdAt": Utc::now().to_rfc3339(),
    });
    match store.create(collection, judge_id, &body) {
        Ok(()) => {
            info!(judge_id, "registered judge");
            Ok(Registration::Registered)
        }
        Err(MarksError::DocumentExists { .. }) => Ok(Registration::AlreadyRegistered),
        Err(error) => Err(error),
    }
}
