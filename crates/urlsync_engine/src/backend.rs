use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::filename::store_filename;
use crate::persist::{AtomicFileWriter, PersistError};

/// Raw text storage for named stores. Encoding is handled by the caller.
pub trait StoreBackend: Send {
    /// `Ok(None)` when nothing has been stored under `name` yet.
    fn read(&self, name: &str) -> Result<Option<String>, PersistError>;
    fn write(&mut self, name: &str, content: &str) -> Result<(), PersistError>;
    fn remove(&mut self, name: &str) -> Result<(), PersistError>;
}

/// One browsing session. Every session-tier store opened from clones of the
/// same scope shares contents; dropping the last clone ends the session.
#[derive(Debug, Clone, Default)]
pub struct SessionScope {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn backend(&self) -> SessionBackend {
        SessionBackend {
            scope: self.clone(),
        }
    }

    fn with_slots<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slots)
    }
}

#[derive(Debug, Clone)]
pub struct SessionBackend {
    scope: SessionScope,
}

impl StoreBackend for SessionBackend {
    fn read(&self, name: &str) -> Result<Option<String>, PersistError> {
        Ok(self.scope.with_slots(|slots| slots.get(name).cloned()))
    }

    fn write(&mut self, name: &str, content: &str) -> Result<(), PersistError> {
        self.scope.with_slots(|slots| {
            slots.insert(name.to_string(), content.to_string());
        });
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), PersistError> {
        self.scope.with_slots(|slots| {
            slots.remove(name);
        });
        Ok(())
    }
}

/// One JSON file per store under the state directory.
#[derive(Debug, Clone)]
pub struct DurableBackend {
    writer: AtomicFileWriter,
}

impl DurableBackend {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.writer.dir().join(store_filename(name))
    }
}

impl StoreBackend for DurableBackend {
    fn read(&self, name: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path_for(name)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, name: &str, content: &str) -> Result<(), PersistError> {
        self.writer.write(&store_filename(name), content)?;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), PersistError> {
        self.writer.remove(&store_filename(name))
    }
}
