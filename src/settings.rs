use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::model::schedule::{EngineSettings, OfficeGeofence, WorkScheduleConfig};

/// Live engine configuration. Administrators swap values in at runtime;
/// readers always work on a copied snapshot, never on the shared value.
#[derive(Debug, Default)]
pub struct SettingsStore {
    inner: RwLock<EngineSettings>,
}

impl SettingsStore {
    pub fn new(initial: EngineSettings) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub fn snapshot(&self) -> EngineSettings {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_schedule(&self, schedule: Option<WorkScheduleConfig>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.schedule = schedule;
        match schedule {
            Some(s) => info!(
                shift_start = %s.shift_start,
                grace_period_minutes = s.grace_period_minutes,
                "Work schedule updated"
            ),
            None => info!("Work schedule cleared, punctuality is not applicable"),
        }
    }

    pub fn set_geofence(&self, geofence: Option<OfficeGeofence>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.geofence = geofence;
        match geofence {
            Some(g) => info!(radius_meters = g.radius_meters, "Office geofence updated"),
            None => info!("Office geofence cleared"),
        }
    }
}
