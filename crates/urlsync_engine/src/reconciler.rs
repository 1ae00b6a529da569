use std::mem;

use sync_logging::{set_dispatch_seq, sync_debug, sync_info, sync_trace};
use urlsync_core::{update, Effect, FieldOutputs, FieldRegistry, StoreRecord, Trigger};

use crate::share::share_token_for;
use crate::store::KeyValueStore;
use crate::types::Phase;

/// What the host UI has to apply after one dispatch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchOutcome {
    /// `None` when the trigger was ignored.
    pub fields: Option<FieldOutputs>,
    pub navigate: Option<String>,
    pub persisted: bool,
}

/// Owns the store record and runs every trigger to completion, one at a time.
pub struct Reconciler {
    registry: FieldRegistry,
    store: KeyValueStore,
    record: StoreRecord,
    phase: Phase,
    dispatched: u64,
}

impl Reconciler {
    /// Loads the current record from `store`.
    pub fn new(registry: FieldRegistry, store: KeyValueStore) -> Self {
        let record = store.load();
        Self {
            registry,
            store,
            record,
            phase: Phase::Idle,
            dispatched: 0,
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn record(&self) -> &StoreRecord {
        &self.record
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn dispatch(&mut self, trigger: Trigger) -> DispatchOutcome {
        debug_assert_eq!(self.phase, Phase::Idle);
        self.phase = Phase::Dispatching;
        self.dispatched += 1;
        set_dispatch_seq(self.dispatched);
        sync_debug!("{:?}", trigger);

        let record = mem::take(&mut self.record);
        let (record, effects) = update(&self.registry, record, trigger);
        self.record = record;

        let mut outcome = DispatchOutcome::default();
        for effect in effects {
            match effect {
                Effect::SetFields(fields) => {
                    sync_debug!(
                        "sets {} of {} fields",
                        fields.changed_count(),
                        self.registry.len()
                    );
                    outcome.fields = Some(fields);
                }
                Effect::Navigate { url } => {
                    sync_info!("navigate url={}", url);
                    outcome.navigate = Some(url);
                }
                Effect::PersistStore => {
                    outcome.persisted = self.store.commit(&self.record);
                    sync_trace!("persisted={}", outcome.persisted);
                }
            }
        }
        if outcome.fields.is_none() {
            sync_debug!("ignored");
        }

        set_dispatch_seq(0);
        self.phase = Phase::Idle;
        outcome
    }

    /// Drop every stored value, in memory and on the tier.
    pub fn clear(&mut self) -> bool {
        self.record = StoreRecord::new();
        self.store.clear()
    }

    pub fn share_token(&self) -> String {
        share_token_for(&self.record)
    }
}
