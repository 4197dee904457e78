//! Driver control: per-download pause tokens and the single-driver guard.
//!
//! Each live lifecycle driver is registered here with a pause token handed to
//! it at spawn time. Pause/resume handlers signal the token; the download loop
//! checks it once per tick and stops. Registration refuses an id that already
//! has a live driver, so two drivers can never race on one record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Shared registry of download id -> pause token for live drivers.
#[derive(Default)]
pub struct DriverControl {
    drivers: RwLock<HashMap<Uuid, Arc<AtomicBool>>>,
}

impl DriverControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver for `id` and return its fresh pause token.
    /// Returns `None` when a driver is already live for the id; callers must
    /// not spawn in that case.
    pub fn register(&self, id: Uuid) -> Option<Arc<AtomicBool>> {
        let mut drivers = self.drivers.write().unwrap();
        if drivers.contains_key(&id) {
            return None;
        }
        let token = Arc::new(AtomicBool::new(false));
        drivers.insert(id, Arc::clone(&token));
        Some(token)
    }

    /// Unregister a driver (call on every exit path, success or failure).
    pub fn unregister(&self, id: Uuid) {
        self.drivers.write().unwrap().remove(&id);
    }

    /// Request pause for a live driver. Returns false when no driver is
    /// registered for the id (pausing an idle record is a pure status change).
    pub fn request_pause(&self, id: Uuid) -> bool {
        match self.drivers.read().unwrap().get(&id) {
            Some(token) => {
                token.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// True while a driver is registered for the id.
    pub fn is_active(&self, id: Uuid) -> bool {
        self.drivers.read().unwrap().contains_key(&id)
    }

    /// Delete-time cleanup: signal any live driver and drop the entry so the
    /// registry never grows with removed downloads.
    pub fn clear(&self, id: Uuid) {
        if let Some(token) = self.drivers.write().unwrap().remove(&id) {
            token.store(true, Ordering::Relaxed);
        }
    }
}
