//! Urlsync core: pure reconciliation between field values, the store record and the page URL.
mod effect;
mod msg;
mod record;
mod registry;
mod update;
mod url_build;
mod url_parse;
mod view_model;

pub use effect::Effect;
pub use msg::Trigger;
pub use record::{
    get, is_reserved_key, set, FieldValue, Model, ReservedKeys, RoutingState, StoreRecord,
    RESERVED_KEYS,
};
pub use registry::{FieldRegistry, RegistryError};
pub use update::{apply_navigation, update};
pub use url_build::{base_url, build_url};
pub use url_parse::{parse_url, ParsedUrl, QueryParams};
pub use view_model::{FieldOutputs, FieldUpdate};
