use sync_logging::{sync_debug, sync_error, sync_info, sync_warn};
use urlsync_core::StoreRecord;

use crate::backend::{DurableBackend, SessionScope, StoreBackend};
use crate::codec::{decode_record, encode_record};
use crate::types::{Clock, EngineConfig, StoreTier};

/// A named store instance bound to one persistence tier.
///
/// Reads and writes are best effort: failures are logged and never block a dispatch.
pub struct KeyValueStore {
    name: String,
    tier: StoreTier,
    backend: Box<dyn StoreBackend>,
    clock: Option<Clock>,
}

impl KeyValueStore {
    /// Open `name` on the tier selected at the use site.
    pub fn open(
        name: impl Into<String>,
        tier: StoreTier,
        config: &EngineConfig,
        session: &SessionScope,
    ) -> Self {
        let backend: Box<dyn StoreBackend> = match tier {
            StoreTier::Session => Box::new(session.backend()),
            StoreTier::Durable => Box::new(DurableBackend::new(config.state_dir.clone())),
        };
        Self::with_backend(name, tier, backend, config.clock.clone())
    }

    pub fn with_backend(
        name: impl Into<String>,
        tier: StoreTier,
        backend: Box<dyn StoreBackend>,
        clock: Option<Clock>,
    ) -> Self {
        Self {
            name: name.into(),
            tier,
            backend,
            clock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tier(&self) -> StoreTier {
        self.tier
    }

    /// Current persisted record; empty when missing, unreadable or corrupt.
    pub fn load(&self) -> StoreRecord {
        match self.backend.read(&self.name) {
            Ok(Some(content)) => {
                let record = decode_record(&content);
                sync_info!("Loaded {} store {:?}", self.tier, self.name);
                record
            }
            Ok(None) => {
                sync_debug!("No persisted {} store {:?}; starting empty", self.tier, self.name);
                StoreRecord::new()
            }
            Err(err) => {
                sync_warn!("Failed to read {} store {:?}: {}", self.tier, self.name, err);
                StoreRecord::new()
            }
        }
    }

    /// Write `record` to the tier. Returns whether the write landed.
    pub fn commit(&mut self, record: &StoreRecord) -> bool {
        let saved_utc = self.clock.as_ref().map(|clock| clock());
        let content = match encode_record(record, saved_utc) {
            Ok(text) => text,
            Err(err) => {
                sync_error!("Failed to serialize store {:?}: {}", self.name, err);
                return false;
            }
        };
        match self.backend.write(&self.name, &content) {
            Ok(()) => true,
            Err(err) => {
                sync_error!("Failed to write {} store {:?}: {}", self.tier, self.name, err);
                false
            }
        }
    }

    pub fn clear(&mut self) -> bool {
        match self.backend.remove(&self.name) {
            Ok(()) => {
                sync_info!("Cleared {} store {:?}", self.tier, self.name);
                true
            }
            Err(err) => {
                sync_error!("Failed to clear {} store {:?}: {}", self.tier, self.name, err);
                false
            }
        }
    }
}
