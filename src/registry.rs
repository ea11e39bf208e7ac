// Static device registry from config

use serde::Deserialize;

use crate::models::DeviceListEntry;

/// One configured device: logical id, display name, hardware address,
/// and the channel tag carrying its measurement.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceEntry {
    pub id: String,
    pub name: String,
    pub mac: String,
    pub channel: String,
}

/// Immutable id -> device mapping built once at startup.
/// Source of truth for which logical ids are queryable.
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    entries: Vec<DeviceEntry>,
}

impl DeviceRegistry {
    pub fn new(entries: Vec<DeviceEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&DeviceEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Reverse lookup by hardware address (registries hold a handful of
    /// entries; a scan is fine). MAC comparison ignores case.
    pub fn find_by_mac(&self, mac: &str) -> Option<&DeviceEntry> {
        self.entries.iter().find(|e| e.mac.eq_ignore_ascii_case(mac))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registry shaped for the frontend device picker.
    pub fn listing(&self) -> Vec<DeviceListEntry> {
        self.entries
            .iter()
            .map(|e| DeviceListEntry {
                id: e.id.clone(),
                name: e.name.clone(),
                mac: e.mac.clone(),
            })
            .collect()
    }
}
