use crate::FieldValue;

#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// A registered input changed its value.
    FieldEdited { field: String, value: FieldValue },
    /// The page URL changed (path and/or query).
    Navigated { href: String },
    /// Host started with a previously persisted store; push stored values into the fields.
    StoreRestored,
}
