use crate::error::{MarksError, Result};
use crate::types::config::MarksConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "housemarks.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".housemarks/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/housemarks/config.toml";

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"[event]
name = "House Inspection"
houses = ["Aravali", "Nilgiri", "Shivalik", "Udaigiri"]
categories = ["boys", "girls"]
max_judges = 3

[[criteria]]
key = "decoration"
label = "Display House Decoration"
max = 20

[[criteria]]
key = "items"
label = "Display Items & Belongings"
max = 20

[[criteria]]
key = "dorm"
label = "Cleanliness Inside Dorm"
max = 10

[[criteria]]
key = "fanTube"
label = "Status of Fan & Tube"
max = 10

[[criteria]]
key = "footpath"
label = "Cleanliness of Surrounding Footpath"
max = 10

[[criteria]]
key = "grass"
label = "Cleanliness of Grass & Bushes"
max = 10

[[criteria]]
key = "surrounding"
label = "Cleanliness of Surrounding"
max = 20

[store]
scores_collection = "scores"
legacy_collections = ["judges_scores"]
judges_collection = "judges"
"#;

/// Loads and validates the layered config; `None` when the data root has no config file.
pub fn load_config(root: &Path) -> Result<Option<MarksConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<MarksConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: MarksConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| MarksError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(Some(cfg))
}

/// Writes the default config; refuses to replace an existing one.
pub fn write_default_config(root: &Path) -> Result<PathBuf> {
    let path = root.join(DEFAULT_CONFIG_FILE);
    if path.exists() {
        return Err(MarksError::ConfigExists(path.display().to_string()));
    }
    std::fs::create_dir_all(root)?;
    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
    Ok(path)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| MarksError::ConfigParse(format!("{}: {}", path.display(), e)))
}

/// Tables merge key by key; any other value (including arrays) replaces the base.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
