use crate::{
    base_url, build_url, is_reserved_key, parse_url, Effect, FieldOutputs, FieldRegistry,
    FieldValue, Model, StoreRecord, Trigger,
};

/// Pure reconciliation: applies one trigger to the store and returns the effects to run.
///
/// Field and navigation triggers always end with `SetFields`, an optional `Navigate`
/// and `PersistStore`, in that order. A restore only emits `SetFields`. An edit for a
/// field outside the registry changes nothing.
pub fn update(
    registry: &FieldRegistry,
    mut store: StoreRecord,
    trigger: Trigger,
) -> (StoreRecord, Vec<Effect>) {
    match trigger {
        Trigger::FieldEdited { field, value } => {
            if !registry.contains(&field) {
                return (store, Vec::new());
            }
            store.insert(&field, value);
        }
        Trigger::Navigated { href } => {
            store = apply_navigation(store, &href);
        }
        Trigger::StoreRestored => {
            let fields = FieldOutputs::from_store(registry, &store);
            return (store, vec![Effect::SetFields(fields)]);
        }
    }

    let mut effects = Vec::with_capacity(3);
    effects.push(Effect::SetFields(FieldOutputs::from_store(registry, &store)));
    if let Some(url) = build_url(&store) {
        effects.push(Effect::Navigate { url });
    }
    effects.push(Effect::PersistStore);
    (store, effects)
}

/// Record `href` and fold its routing path and query into the store.
///
/// Only an `href` with an http(s) base replaces the recorded url; relative or
/// malformed input keeps the previous base. Path-derived keys are written
/// first, then query keys, so the query wins.
pub fn apply_navigation(mut store: StoreRecord, href: &str) -> StoreRecord {
    if base_url(href).is_some() {
        store.set_url(Some(href.to_string()));
    }
    let parsed = parse_url(href);

    match parsed.path_segments.as_slice() {
        [model, kind] => {
            store.set_model(Some(Model::from_token(model)));
            store.set_kind(Some(kind.clone()));
        }
        [model] => {
            store.set_model(Model::known(model));
            store.set_kind(None);
        }
        _ => {}
    }

    for (key, values) in parsed.query_params.iter() {
        if is_reserved_key(key) {
            continue;
        }
        if let Some(first) = values.first() {
            store.insert(key, FieldValue::Text(first.clone()));
        }
    }
    store
}
