use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sync_logging::sync_info;
use thiserror::Error;
use urlsync_engine::StoreTier;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Host settings, read from a RON file. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store_name: String,
    pub tier: StoreTier,
    /// Synchronized input ids, in output order.
    pub fields: Vec<String>,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_name: "input_environmental_personal".to_string(),
            tier: StoreTier::Durable,
            fields: [
                "t_db_input",
                "t_r_input",
                "v_input",
                "rh_input",
                "met_input",
                "clo_input",
            ]
            .into_iter()
            .map(ToOwned::to_owned)
            .collect(),
            state_dir: PathBuf::from("./state"),
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Defaults when `path` is `None` or does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                sync_info!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
