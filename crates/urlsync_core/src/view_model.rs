use crate::{FieldRegistry, FieldValue, StoreRecord};

/// What the UI should do with one input after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Leave the input as it is; never clears it.
    NoChange,
    Set(FieldValue),
}

/// Per-field outputs keyed by field id, kept in registry order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldOutputs {
    entries: Vec<(String, FieldUpdate)>,
}

impl FieldOutputs {
    pub(crate) fn from_store(registry: &FieldRegistry, store: &StoreRecord) -> Self {
        let entries = registry
            .iter()
            .map(|id| {
                let update = match store.get(id) {
                    Some(value) => FieldUpdate::Set(value.clone()),
                    None => FieldUpdate::NoChange,
                };
                (id.to_string(), update)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, field: &str) -> Option<&FieldUpdate> {
        self.entries
            .iter()
            .find(|(id, _)| id == field)
            .map(|(_, update)| update)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldUpdate)> {
        self.entries.iter().map(|(id, update)| (id.as_str(), update))
    }

    /// Number of inputs that receive a value.
    pub fn changed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, update)| matches!(update, FieldUpdate::Set(_)))
            .count()
    }

    /// Positional form for UI layers that bind outputs by index.
    pub fn to_positional(self) -> Vec<FieldUpdate> {
        self.entries.into_iter().map(|(_, update)| update).collect()
    }
}
