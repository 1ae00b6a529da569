use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Produces the timestamp recorded with each durable commit.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// How long a store outlives the process that wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreTier {
    /// Gone when the owning [`crate::SessionScope`] is dropped.
    Session,
    /// Kept on disk across runs.
    #[default]
    Durable,
}

impl fmt::Display for StoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreTier::Session => write!(f, "session"),
            StoreTier::Durable => write!(f, "durable"),
        }
    }
}

#[derive(Clone)]
pub struct EngineConfig {
    /// Directory holding durable store files.
    pub state_dir: PathBuf,
    pub clock: Option<Clock>,
}

impl EngineConfig {
    pub fn default_with_state_dir(state_dir: PathBuf) -> Self {
        Self {
            state_dir,
            clock: None,
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("state_dir", &self.state_dir)
            .field("clock", &self.clock.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dispatching,
}
