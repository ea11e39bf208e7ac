// Parallel device aggregation: fan-out one task per device, join in input order

use std::collections::BTreeMap;

use crate::models::{DeviceRecord, KeyedRecord};
use crate::upstream::{UpstreamClient, UpstreamError};

/// Everything needed to fetch one record: the hardware address to query,
/// the channel tag to read, and the registry id when the caller resolved one.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub mac: String,
    pub channel: String,
    pub id: Option<String>,
}

/// Fetch one record, propagating the failure. Single-device callers surface
/// the error; batch callers go through [`fetch_records`] instead.
pub async fn fetch_single(
    client: &UpstreamClient,
    request: FetchRequest,
) -> Result<DeviceRecord, UpstreamError> {
    let info = client.get_device_info(&request.mac).await?;
    let current_value = info.channel_value(&request.channel);
    Ok(DeviceRecord {
        id: request.id,
        name: info.name,
        // the upstream echoes the address back; fall back to the requested one
        mac: if info.mac.is_empty() { request.mac } else { info.mac },
        current_value,
    })
}

/// Fan-out/fan-in over a batch: one spawned task per request, joined into a
/// slot vector indexed by input order. A failed lookup (or a panicked task)
/// leaves `None` in its slot and never fails the batch.
pub async fn fetch_records(
    client: &UpstreamClient,
    requests: Vec<FetchRequest>,
) -> Vec<Option<DeviceRecord>> {
    let handles: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let client = client.clone();
            tokio::spawn(async move {
                let mac = request.mac.clone();
                match fetch_single(&client, request).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(error = %e, %mac, operation = "get_device_info", "device lookup failed");
                        None
                    }
                }
            })
        })
        .collect();

    let mut slots = Vec::with_capacity(handles.len());
    for handle in handles {
        slots.push(handle.await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "fetch_records", "device task panicked");
            None
        }));
    }
    slots
}

/// List shape: drop failed slots, preserving input order.
pub fn collect_list(slots: Vec<Option<DeviceRecord>>) -> Vec<DeviceRecord> {
    slots.into_iter().flatten().collect()
}

/// Keyed shape: surviving records keyed by the identifier the caller asked
/// for, with the identifier omitted inside each value. Failed lookups are
/// simply absent from the map.
pub fn collect_keyed(
    keys: &[String],
    slots: Vec<Option<DeviceRecord>>,
) -> BTreeMap<String, KeyedRecord> {
    keys.iter()
        .zip(slots)
        .filter_map(|(key, slot)| slot.map(|record| (key.clone(), KeyedRecord::from(record))))
        .collect()
}
