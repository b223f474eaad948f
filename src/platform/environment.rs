//! Build/runtime environment settings for the host application.
//!
//! The environment is resolved from, in order of precedence:
//! 1. `ANALYTICS_PRODUCTION` / `GOOGLE_ANALYTICS_ID` individual variables,
//! 2. `ANALYTICS_ENVIRONMENT` (inline JSON, a path to a JSON file, or `key=value,key=value`),
//! 3. `ANALYTICS_ENVIRONMENT_PATH` (JSON file),
//! 4. the `__ANALYTICS_ENVIRONMENT__` global when running in a browser with `wasm-web`.

use std::env;
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub const ENVIRONMENT_VAR: &str = "ANALYTICS_ENVIRONMENT";
pub const ENVIRONMENT_PATH_VAR: &str = "ANALYTICS_ENVIRONMENT_PATH";
pub const PRODUCTION_VAR: &str = "ANALYTICS_PRODUCTION";
pub const SITE_ID_VAR: &str = "GOOGLE_ANALYTICS_ID";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEnvironment {
    #[serde(default, deserialize_with = "flag")]
    pub production: bool,
    #[serde(default)]
    pub google_analytics_id: String,
}

impl AppEnvironment {
    pub fn new(production: bool, google_analytics_id: impl Into<String>) -> Self {
        Self {
            production,
            google_analytics_id: google_analytics_id.into(),
        }
    }

    /// Resolves the environment from process variables and browser globals.
    pub fn load() -> Self {
        let mut environment = environment_document()
            .and_then(from_value)
            .unwrap_or_default();

        if let Ok(raw) = env::var(PRODUCTION_VAR) {
            match parse_flag(&raw) {
                Some(production) => environment.production = production,
                None => log::warn!("ignoring {PRODUCTION_VAR}=`{raw}`; expected true/false"),
            }
        }
        if let Ok(site_id) = env::var(SITE_ID_VAR) {
            environment.google_analytics_id = site_id;
        }
        environment
    }
}

fn environment_document() -> Option<Value> {
    env::var(ENVIRONMENT_VAR)
        .ok()
        .and_then(|raw| parse_config_source(&raw))
        .or_else(|| {
            let path = env::var(ENVIRONMENT_PATH_VAR).ok()?;
            let content = fs::read_to_string(path).ok()?;
            serde_json::from_str(&content).ok()
        })
        .or_else(environment_from_global)
}

fn from_value(value: Value) -> Option<AppEnvironment> {
    match serde_json::from_value(value) {
        Ok(environment) => Some(environment),
        Err(err) => {
            log::warn!("ignoring malformed analytics environment: {err}");
            None
        }
    }
}

#[cfg(all(target_arch = "wasm32", feature = "wasm-web"))]
fn environment_from_global() -> Option<Value> {
    use wasm_bindgen::JsValue;

    let global = js_sys::global();
    let value = js_sys::Reflect::get(&global, &JsValue::from_str("__ANALYTICS_ENVIRONMENT__")).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    let serialized = js_sys::JSON::stringify(&value).ok()?.as_string()?;
    serde_json::from_str(&serialized).ok()
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm-web")))]
fn environment_from_global() -> Option<Value> {
    None
}

fn parse_config_source(raw: &str) -> Option<Value> {
    if let Ok(json) = serde_json::from_str::<Value>(raw) {
        if json.is_object() {
            return Some(json);
        }
    }

    if let Some(path) = treat_as_path(raw) {
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(json) = serde_json::from_str::<Value>(&contents) {
                if json.is_object() {
                    return Some(json);
                }
            }
        }
    }

    parse_key_value_config(raw)
}

#[cfg(not(target_arch = "wasm32"))]
fn treat_as_path(raw: &str) -> Option<String> {
    if raw.contains('=') {
        return None;
    }
    let trimmed = raw.trim();
    Path::new(trimmed).exists().then(|| trimmed.to_string())
}

#[cfg(target_arch = "wasm32")]
fn treat_as_path(_raw: &str) -> Option<String> {
    None
}

fn parse_key_value_config(raw: &str) -> Option<Value> {
    let mut map = Map::new();
    for entry in raw.split(',') {
        let Some((key, value)) = entry.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), Value::String(value.to_string()));
    }
    (!map.is_empty()).then_some(Value::Object(map))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

// Key/value sources only carry strings, so the flag accepts `"true"` as well as `true`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(value) => Ok(value),
        Value::String(text) => parse_flag(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid production flag `{text}`"))),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid production flag `{other}`"))),
    }
}
