//! Urlsync engine: store persistence tiers and effect execution around the pure core.
mod backend;
mod codec;
mod filename;
mod persist;
mod reconciler;
mod share;
mod store;
mod types;

pub use backend::{DurableBackend, SessionBackend, SessionScope, StoreBackend};
pub use codec::{decode_record, encode_record};
pub use filename::store_filename;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use reconciler::{DispatchOutcome, Reconciler};
pub use share::{decode_share_token, encode_share_token, share_token_for, ShareTokenError};
pub use store::KeyValueStore;
pub use types::{Clock, EngineConfig, Phase, StoreTier};
