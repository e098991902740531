// ============================================================================
// STORAGE - Backends clave/valor (localStorage del navegador o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{window, Storage};

use crate::errors::StorageError;

/// Almacenamiento clave/valor síncrono, de un solo hilo
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    pub fn new() -> Result<Self, StorageError> {
        get_local_storage()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }
}

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(|_| StorageError::Remove {
            key: key.to_string(),
        })
    }
}

/// Storage en memoria: tests y fallback cuando localStorage no existe
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<RefCell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula un storage lleno (QuotaExceededError): toda escritura falla
    pub fn set_read_only(&self, read_only: bool) {
        *self.read_only.borrow_mut() = read_only;
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.read_only.borrow() {
            return Err(StorageError::Write { key: key.to_string() });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// localStorage si está disponible, si no memoria (modo privado, iframes sandbox)
pub fn default_backend() -> Rc<dyn StorageBackend> {
    match BrowserStorage::new() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            log::warn!("⚠️ [STORE] {}, usando almacenamiento en memoria", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
