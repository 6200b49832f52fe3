//! Key-value persistence used by the countdown engine and the theme toggle.
//!
//! Every store is bound to one fixed key. Storage is best-effort: when the
//! backend is missing or refuses access, reads come back empty and writes are
//! dropped, so callers keep working purely in memory.

use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

pub trait KeyValueStore {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
    fn clear(&self);
}

/// Browser `localStorage` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalStore {
    key: &'static str,
}

impl LocalStore {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    #[cfg(target_arch = "wasm32")]
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    // Headless builds (native tests, server-side tooling) have no browser storage.
    #[cfg(not(target_arch = "wasm32"))]
    fn backend() -> Option<web_sys::Storage> {
        None
    }
}

impl KeyValueStore for LocalStore {
    fn load(&self) -> Option<String> {
        let storage = Self::backend()?;
        match storage.get_item(self.key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read '{}' from local storage: {:?}", self.key, e);
                None
            }
        }
    }

    fn save(&self, value: &str) {
        if let Some(storage) = Self::backend() {
            if let Err(e) = storage.set_item(self.key, value) {
                warn!("Could not write '{}' to local storage: {:?}", self.key, e);
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::backend() {
            if let Err(e) = storage.remove_item(self.key) {
                warn!("Could not remove '{}' from local storage: {:?}", self.key, e);
            }
        }
    }
}

/// In-memory store. Clones share the same slot, so a test can keep one handle
/// while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.into()))),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, value: &str) {
        *self.slot.borrow_mut() = Some(value.to_string());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
