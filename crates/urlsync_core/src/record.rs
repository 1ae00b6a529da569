use std::fmt;

/// Keys that never pass through as generic field values or query parameters.
pub const RESERVED_KEYS: [&str; 4] = ["url", "model", "type", "compare"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// A synchronized input value as it lives in the store.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Interpret raw user input: `null`, a finite number, or free text.
    ///
    /// Input only becomes a number when it prints back unchanged, so `1.20` or
    /// `007` stay text and are echoed exactly as typed.
    pub fn parse_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == "null" {
            return FieldValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() && number.to_string() == trimmed => {
                FieldValue::Number(number)
            }
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// The model token taken from the first path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Model {
    Single,
    Range,
    Compare,
    /// Any other token from a two-segment path; routes like "no model".
    Other(String),
}

impl Model {
    /// Recognized routing models only.
    pub fn known(token: &str) -> Option<Self> {
        match token {
            "single" => Some(Model::Single),
            "range" => Some(Model::Range),
            "compare" => Some(Model::Compare),
            _ => None,
        }
    }

    pub fn from_token(token: &str) -> Self {
        Self::known(token).unwrap_or_else(|| Model::Other(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Model::Single => "single",
            Model::Range => "range",
            Model::Compare => "compare",
            Model::Other(token) => token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservedKeys {
    pub url: Option<String>,
    pub model: Option<Model>,
    /// Stored under the `type` key.
    pub kind: Option<String>,
}

/// Read-only view of the routing part of a record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutingState {
    pub model: Option<Model>,
    pub kind: Option<String>,
}

/// The persisted key-value record: reserved routing keys plus free-form field values.
///
/// Free-form keys iterate in insertion order; rebinding a key keeps its slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreRecord {
    reserved: ReservedKeys,
    freeform: Vec<(String, FieldValue)>,
}

impl StoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved(&self) -> &ReservedKeys {
        &self.reserved
    }

    pub fn url(&self) -> Option<&str> {
        self.reserved.url.as_deref()
    }

    pub fn routing(&self) -> RoutingState {
        RoutingState {
            model: self.reserved.model.clone(),
            kind: self.reserved.kind.clone(),
        }
    }

    /// Free-form value for `key`. `None` means absent, distinct from a stored null.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.freeform
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Bind `key` to `value`. Reserved keys land in their typed slot.
    pub fn set(mut self, key: &str, value: FieldValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: FieldValue) {
        match key {
            "url" => self.reserved.url = text_of(value),
            "model" => self.reserved.model = text_of(value).map(|token| Model::from_token(&token)),
            "type" => self.reserved.kind = text_of(value),
            // Routing flag only; never stored.
            "compare" => {}
            _ => match self.freeform.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => self.freeform.push((key.to_string(), value)),
            },
        }
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.reserved.url = url;
    }

    pub fn set_model(&mut self, model: Option<Model>) {
        self.reserved.model = model;
    }

    pub fn set_kind(&mut self, kind: Option<String>) {
        self.reserved.kind = kind;
    }

    /// Free-form entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.freeform.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.freeform.is_empty() && self.reserved == ReservedKeys::default()
    }
}

fn text_of(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Null => None,
        FieldValue::Text(text) => Some(text),
        FieldValue::Number(number) => Some(number.to_string()),
    }
}

/// Look up `key` in a possibly missing record.
pub fn get<'a>(store: Option<&'a StoreRecord>, key: &str) -> Option<&'a FieldValue> {
    store.and_then(|record| record.get(key))
}

/// Bind `key` in a possibly missing record; a missing record starts empty.
pub fn set(store: Option<StoreRecord>, key: &str, value: FieldValue) -> StoreRecord {
    store.unwrap_or_default().set(key, value)
}
