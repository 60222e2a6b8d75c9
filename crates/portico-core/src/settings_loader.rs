//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults, nested tables merge).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `PORTICO_DEBUG` | `debug` |
//! | `PORTICO_LOG_LEVEL` | `log_level` |
//! | `PORTICO_INDEX_ROUTE` | `routes.index` |
//! | `PORTICO_SIGN_UP_ROUTE` | `routes.sign_up` |
//! | `PORTICO_SIGN_IN_ROUTE` | `routes.sign_in` |
//! | `PORTICO_PASSWORD_MIN_LENGTH` | `password_min_length` |
//! | `PORTICO_NOTIFICATION_DURATION_MS` | `notifications.transient_duration_ms` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use portico_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/portico.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::PorticoError;
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, PorticoError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| PorticoError::Configuration(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, PorticoError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, PorticoError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
pub fn from_json_str(json_str: &str) -> Result<Settings, PorticoError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| PorticoError::Configuration(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, PorticoError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from an optional TOML or JSON file, chosen by extension,
/// and then applies environment variable overrides. Without a file the
/// defaults are the starting point.
pub fn load(path: Option<&Path>) -> Result<Settings, PorticoError> {
    let Some(path) = path else {
        return Ok(from_env());
    };
    let mut settings = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => from_toml_file(path)?,
        Some("json") => from_json_file(path)?,
        _ => {
            return Err(PorticoError::Configuration(format!(
                "Unsupported settings file '{}': expected .toml or .json",
                path.display()
            )))
        }
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `PORTICO_*` environment variable overrides.
///
/// Unparseable numeric values are ignored and the current value is kept.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` in place of the process environment.
fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("PORTICO_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("PORTICO_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("PORTICO_INDEX_ROUTE") {
        settings.routes.index = val;
    }

    if let Some(val) = lookup("PORTICO_SIGN_UP_ROUTE") {
        settings.routes.sign_up = val;
    }

    if let Some(val) = lookup("PORTICO_SIGN_IN_ROUTE") {
        settings.routes.sign_in = val;
    }

    if let Some(len) = lookup("PORTICO_PASSWORD_MIN_LENGTH").and_then(|v| v.parse().ok()) {
        settings.password_min_length = len;
    }

    if let Some(ms) = lookup("PORTICO_NOTIFICATION_DURATION_MS").and_then(|v| v.parse().ok()) {
        settings.notifications.transient_duration_ms = ms;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, PorticoError> {
    std::fs::read_to_string(path).map_err(|e| {
        PorticoError::Configuration(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, PorticoError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        PorticoError::Configuration(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        PorticoError::Configuration(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
