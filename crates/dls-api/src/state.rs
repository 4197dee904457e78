//! Shared handler state.

use std::sync::Arc;

use dls_core::config::DriverConfig;
use dls_core::control::DriverControl;
use dls_core::records::RecordDb;

/// Everything a handler needs: the registry, the driver control map, and the
/// driver tuning. Cheap to clone; the control map is shared.
#[derive(Clone)]
pub struct AppState {
    pub db: RecordDb,
    pub control: Arc<DriverControl>,
    pub cfg: DriverConfig,
}

impl AppState {
    pub fn new(db: RecordDb, cfg: DriverConfig) -> Self {
        Self {
            db,
            control: Arc::new(DriverControl::new()),
            cfg,
        }
    }
}
