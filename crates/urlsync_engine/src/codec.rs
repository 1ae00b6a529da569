use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use sync_logging::sync_warn;
use urlsync_core::{FieldValue, StoreRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    key: String,
    value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_utc: Option<String>,
    #[serde(default)]
    entries: Vec<PersistedEntry>,
}

/// Serialize a record as ordered JSON entries, reserved keys first.
pub fn encode_record(
    record: &StoreRecord,
    saved_utc: Option<String>,
) -> serde_json::Result<String> {
    let reserved = record.reserved();
    let mut entries = Vec::new();
    if let Some(url) = &reserved.url {
        entries.push(entry("url", Value::String(url.clone())));
    }
    entries.push(entry(
        "model",
        reserved
            .model
            .as_ref()
            .map_or(Value::Null, |model| Value::String(model.as_str().to_string())),
    ));
    entries.push(entry(
        "type",
        reserved.kind.clone().map_or(Value::Null, Value::String),
    ));
    entries.extend(
        record
            .entries()
            .map(|(key, value)| entry(key, value_to_json(value))),
    );

    serde_json::to_string_pretty(&PersistedStore { saved_utc, entries })
}

/// Decode persisted text. Anything unreadable yields an empty record.
pub fn decode_record(content: &str) -> StoreRecord {
    let persisted: PersistedStore = match serde_json::from_str(content) {
        Ok(persisted) => persisted,
        Err(err) => {
            sync_warn!("Discarding malformed store content: {}", err);
            return StoreRecord::new();
        }
    };

    let mut record = StoreRecord::new();
    for PersistedEntry { key, value } in persisted.entries {
        match json_to_value(value) {
            Some(value) => record.insert(&key, value),
            None => sync_warn!("Skipping store entry {:?} with unsupported value type", key),
        }
    }
    record
}

fn entry(key: &str, value: Value) -> PersistedEntry {
    PersistedEntry {
        key: key.to_string(),
        value,
    }
}

fn value_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Null => Value::Null,
        FieldValue::Number(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
        FieldValue::Text(text) => Value::String(text.clone()),
    }
}

fn json_to_value(value: Value) -> Option<FieldValue> {
    match value {
        Value::Null => Some(FieldValue::Null),
        Value::Number(number) => number.as_f64().map(FieldValue::Number),
        Value::String(text) => Some(FieldValue::Text(text)),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
