use crate::FieldOutputs;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// New values for the registered inputs, in registry order.
    SetFields(FieldOutputs),
    Navigate { url: String },
    /// The store record changed and must be committed to its tier.
    PersistStore,
}
