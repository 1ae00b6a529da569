use std::sync::Once;

use pretty_assertions::assert_eq;
use urlsync_core::{
    update, Effect, FieldOutputs, FieldRegistry, FieldUpdate, FieldValue, Model, StoreRecord,
    Trigger,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sync_logging::initialize_for_tests);
}

fn registry() -> FieldRegistry {
    FieldRegistry::new(["t_db_input", "rh_input", "met_input"]).expect("valid registry")
}

fn edit(field: &str, value: FieldValue) -> Trigger {
    Trigger::FieldEdited {
        field: field.to_string(),
        value,
    }
}

fn navigate(href: &str) -> Trigger {
    Trigger::Navigated {
        href: href.to_string(),
    }
}

fn fields_of(effects: &[Effect]) -> FieldOutputs {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SetFields(fields) => Some(fields.clone()),
            _ => None,
        })
        .expect("set fields effect")
}

fn navigation_of(effects: &[Effect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        Effect::Navigate { url } => Some(url.clone()),
        _ => None,
    })
}

#[test]
fn edit_without_recorded_url_updates_store_but_not_navigation() {
    init_logging();
    let (store, effects) = update(
        &registry(),
        StoreRecord::new(),
        edit("rh_input", FieldValue::Number(50.0)),
    );

    assert_eq!(store.get("rh_input"), Some(&FieldValue::Number(50.0)));
    assert_eq!(
        effects,
        vec![
            Effect::SetFields(fields_of(&effects)),
            Effect::PersistStore,
        ]
    );
    assert_eq!(
        fields_of(&effects).to_positional(),
        vec![
            FieldUpdate::NoChange,
            FieldUpdate::Set(FieldValue::Number(50.0)),
            FieldUpdate::NoChange,
        ]
    );
}

#[test]
fn outputs_follow_registry_order() {
    init_logging();
    let registry = FieldRegistry::new(["a", "b", "c"]).unwrap();
    let store = StoreRecord::new().set("b", "stored".into());

    let (_store, effects) = update(&registry, store, Trigger::StoreRestored);

    assert_eq!(effects.len(), 1);
    assert_eq!(
        fields_of(&effects).to_positional(),
        vec![
            FieldUpdate::NoChange,
            FieldUpdate::Set(FieldValue::Text("stored".into())),
            FieldUpdate::NoChange,
        ]
    );
}

#[test]
fn stored_null_is_emitted_not_skipped() {
    init_logging();
    let store = StoreRecord::new().set("met_input", FieldValue::Null);
    let (_store, effects) = update(&registry(), store, Trigger::StoreRestored);

    assert_eq!(
        fields_of(&effects).get("met_input"),
        Some(&FieldUpdate::Set(FieldValue::Null))
    );
    assert_eq!(fields_of(&effects).get("rh_input"), Some(&FieldUpdate::NoChange));
}

#[test]
fn navigation_records_url_model_and_query() {
    init_logging();
    let (store, effects) = update(
        &registry(),
        StoreRecord::new(),
        navigate("http://x.test/single?rh_input=50&met_input=1.2"),
    );

    assert_eq!(
        store.url(),
        Some("http://x.test/single?rh_input=50&met_input=1.2")
    );
    assert_eq!(store.routing().model, Some(Model::Single));
    assert_eq!(store.routing().kind, None);
    assert_eq!(store.get("rh_input"), Some(&FieldValue::Text("50".into())));
    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/single?rh_input=50&met_input=1.2")
    );
    assert_eq!(effects.last(), Some(&Effect::PersistStore));
}

#[test]
fn two_segment_path_sets_model_and_type() {
    init_logging();
    let (store, effects) = update(
        &registry(),
        StoreRecord::new(),
        navigate("http://x.test/compare/ip"),
    );

    assert_eq!(store.routing().model, Some(Model::Compare));
    assert_eq!(store.routing().kind.as_deref(), Some("ip"));
    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/compare/ip?type=ip")
    );
}

#[test]
fn unknown_single_segment_clears_model_and_type() {
    init_logging();
    let (store, _) = update(
        &registry(),
        StoreRecord::new(),
        navigate("http://x.test/compare/ip"),
    );
    let (store, effects) = update(&registry(), store, navigate("http://x.test/about"));

    assert_eq!(store.routing().model, None);
    assert_eq!(store.routing().kind, None);
    assert_eq!(navigation_of(&effects).as_deref(), Some("http://x.test/"));
}

#[test]
fn query_overwrites_previous_edit() {
    init_logging();
    let registry = registry();
    let (store, _) = update(
        &registry,
        StoreRecord::new(),
        edit("met_input", "1.0".into()),
    );
    let (store, effects) = update(
        &registry,
        store,
        navigate("http://x.test/single/?met_input=1.2"),
    );

    assert_eq!(store.get("met_input"), Some(&FieldValue::Text("1.2".into())));
    assert_eq!(
        fields_of(&effects).get("met_input"),
        Some(&FieldUpdate::Set(FieldValue::Text("1.2".into())))
    );
}

#[test]
fn reserved_query_keys_do_not_leak_into_fields() {
    init_logging();
    let (store, _) = update(
        &registry(),
        StoreRecord::new(),
        navigate("http://x.test/single?model=range&url=http://evil.test/&rh_input=40"),
    );

    assert_eq!(store.routing().model, Some(Model::Single));
    assert_eq!(
        store.url(),
        Some("http://x.test/single?model=range&url=http://evil.test/&rh_input=40")
    );
    let keys: Vec<_> = store.entries().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["rh_input"]);
}

#[test]
fn repeated_edit_is_idempotent() {
    init_logging();
    let registry = registry();
    let (store, _) = update(
        &registry,
        StoreRecord::new(),
        navigate("http://x.test/range"),
    );

    let (first_store, first_effects) =
        update(&registry, store, edit("t_db_input", FieldValue::Number(25.0)));
    let (second_store, second_effects) = update(
        &registry,
        first_store.clone(),
        edit("t_db_input", FieldValue::Number(25.0)),
    );

    assert_eq!(first_store, second_store);
    assert_eq!(first_effects, second_effects);
    assert_eq!(
        navigation_of(&second_effects).as_deref(),
        Some("http://x.test/range?t_db_input=25")
    );
}

#[test]
fn navigating_to_emitted_url_is_a_fixed_point() {
    init_logging();
    let registry = registry();
    let (store, _) = update(
        &registry,
        StoreRecord::new(),
        navigate("http://x.test/single?rh_input=50"),
    );
    let (store, effects) = update(&registry, store, edit("met_input", FieldValue::Number(1.1)));
    let url = navigation_of(&effects).expect("navigation after edit");
    assert_eq!(url, "http://x.test/single?rh_input=50&met_input=1.1");

    let (next, effects) = update(&registry, store, navigate(&url));
    assert_eq!(navigation_of(&effects).as_deref(), Some(url.as_str()));
    assert_eq!(next.get("met_input"), Some(&FieldValue::Text("1.1".into())));
}

#[test]
fn edit_of_unregistered_field_is_ignored() {
    init_logging();
    let store = StoreRecord::new().set("rh_input", "50".into());
    let (next, effects) = update(&registry(), store.clone(), edit("wind", "3".into()));

    assert_eq!(next, store);
    assert!(effects.is_empty());
}

#[test]
fn relative_navigation_keeps_recorded_base() {
    init_logging();
    let registry = registry();
    let (store, _) = update(
        &registry,
        StoreRecord::new(),
        navigate("http://x.test/single"),
    );

    let (store, effects) = update(&registry, store, navigate("/range?met_input=1.2"));
    assert_eq!(store.url(), Some("http://x.test/single"));
    assert_eq!(store.routing().model, Some(Model::Range));
    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/range?met_input=1.2")
    );

    let (store, effects) = update(&registry, store, edit("rh_input", "50".into()));
    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/range?met_input=1.2&rh_input=50")
    );

    let (store, effects) = update(&registry, store, navigate("not a url"));
    assert_eq!(store.url(), Some("http://x.test/single"));
    assert_eq!(store.routing().model, None);
    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/?met_input=1.2&rh_input=50")
    );
}

#[test]
fn type_leads_the_query_even_when_fields_were_stored_first() {
    init_logging();
    let registry = registry();
    let (store, _) = update(&registry, StoreRecord::new(), edit("rh_input", "50".into()));
    let (_store, effects) = update(&registry, store, navigate("http://x.test/compare/ip"));

    assert_eq!(
        navigation_of(&effects).as_deref(),
        Some("http://x.test/compare/ip?type=ip&rh_input=50")
    );
}
