use thiserror::Error;

use crate::record::is_reserved_key;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("field id must not be empty")]
    EmptyId,
    #[error("field id `{0}` is a reserved store key")]
    Reserved(String),
    #[error("field id `{0}` is registered more than once")]
    Duplicate(String),
}

/// Ordered ids of the inputs that take part in synchronization.
///
/// Order is significant: field outputs are emitted in this order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldRegistry {
    ids: Vec<String>,
}

impl FieldRegistry {
    pub fn new<I, S>(ids: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        for id in ids {
            let id = id.into();
            if id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if is_reserved_key(&id) {
                return Err(RegistryError::Reserved(id));
            }
            if registry.contains(&id) {
                return Err(RegistryError::Duplicate(id));
            }
            registry.ids.push(id);
        }
        Ok(registry)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
