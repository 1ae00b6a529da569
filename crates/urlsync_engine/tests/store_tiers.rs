use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use urlsync_core::{FieldValue, Model, StoreRecord};
use urlsync_engine::{
    decode_record, encode_record, store_filename, EngineConfig, KeyValueStore, SessionScope,
    StoreTier,
};

const STORE: &str = "input_environmental_personal";

fn sample_record() -> StoreRecord {
    let mut record = StoreRecord::new()
        .set("rh_input", "50".into())
        .set("met_input", FieldValue::Number(1.2))
        .set("clo_input", FieldValue::Null);
    record.set_url(Some("http://x.test/compare/ip".into()));
    record.set_model(Some(Model::Compare));
    record.set_kind(Some("ip".into()));
    record
}

fn config(dir: &TempDir) -> EngineConfig {
    let mut config = EngineConfig::default_with_state_dir(dir.path().to_path_buf());
    config.clock = Some(Arc::new(|| "2026-01-01T00:00:00Z".to_string()));
    config
}

#[test]
fn durable_store_survives_new_instance() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let session = SessionScope::new();

    let mut store = KeyValueStore::open(STORE, StoreTier::Durable, &config, &session);
    assert_eq!(store.load(), StoreRecord::new());
    assert!(store.commit(&sample_record()));

    let reopened = KeyValueStore::open(STORE, StoreTier::Durable, &config, &SessionScope::new());
    assert_eq!(reopened.load(), sample_record());

    let on_disk = fs::read_to_string(temp.path().join(store_filename(STORE))).unwrap();
    assert!(on_disk.contains("2026-01-01T00:00:00Z"));
}

#[test]
fn session_store_is_shared_within_scope_only() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let session = SessionScope::new();

    let mut store = KeyValueStore::open(STORE, StoreTier::Session, &config, &session);
    assert!(store.commit(&sample_record()));

    let same_session = KeyValueStore::open(STORE, StoreTier::Session, &config, &session.clone());
    assert_eq!(same_session.load(), sample_record());

    let new_session = KeyValueStore::open(STORE, StoreTier::Session, &config, &SessionScope::new());
    assert_eq!(new_session.load(), StoreRecord::new());

    // Session stores never touch the state directory.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn stores_with_different_names_are_isolated() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let session = SessionScope::new();

    let mut first = KeyValueStore::open("first", StoreTier::Durable, &config, &session);
    assert!(first.commit(&sample_record()));
    let second = KeyValueStore::open("second", StoreTier::Durable, &config, &session);
    assert_eq!(second.load(), StoreRecord::new());
}

#[test]
fn corrupt_durable_file_loads_as_empty() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    fs::write(temp.path().join(store_filename(STORE)), "{not json").unwrap();

    let store = KeyValueStore::open(STORE, StoreTier::Durable, &config, &SessionScope::new());
    assert_eq!(store.load(), StoreRecord::new());
}

#[test]
fn clear_removes_persisted_record() {
    let temp = TempDir::new().unwrap();
    let config = config(&temp);
    let session = SessionScope::new();

    let mut store = KeyValueStore::open(STORE, StoreTier::Durable, &config, &session);
    assert!(store.commit(&sample_record()));
    assert!(store.clear());
    assert_eq!(store.load(), StoreRecord::new());
    assert!(store.clear());
}

#[test]
fn unsupported_entry_values_are_skipped() {
    let content = r#"{
        "entries": [
            {"key": "rh_input", "value": "50"},
            {"key": "flag", "value": true},
            {"key": "met_input", "value": 1.2},
            {"key": "model", "value": "range"}
        ]
    }"#;
    let record = decode_record(content);

    let entries: Vec<_> = record.entries().collect();
    assert_eq!(
        entries,
        vec![
            ("rh_input", &FieldValue::Text("50".into())),
            ("met_input", &FieldValue::Number(1.2)),
        ]
    );
    assert_eq!(record.routing().model, Some(Model::Range));
}

#[test]
fn non_record_json_decodes_as_empty() {
    for content in ["null", "[1, 2]", "\"text\"", ""] {
        assert_eq!(decode_record(content), StoreRecord::new(), "content {content:?}");
    }
}

#[test]
fn encoded_record_keeps_entry_order() {
    let text = encode_record(&sample_record(), None).unwrap();
    let rh = text.find("rh_input").unwrap();
    let met = text.find("met_input").unwrap();
    let clo = text.find("clo_input").unwrap();
    assert!(rh < met && met < clo);
    assert!(!text.contains("saved_utc"));
}
