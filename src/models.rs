// Frontend-facing JSON models

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Latest reading for one device, as rendered in a dashboard panel.
/// `id` is present only when the record was resolved through the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub mac: String,
    pub current_value: CurrentValue,
}

/// Value side of the keyed response shape: the identifier lives in the map
/// key, so it is omitted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyedRecord {
    pub name: String,
    pub current_value: CurrentValue,
}

impl From<DeviceRecord> for KeyedRecord {
    fn from(record: DeviceRecord) -> Self {
        Self {
            name: record.name,
            current_value: record.current_value,
        }
    }
}

/// Scalar measurement, or the "N/A" sentinel when the configured channel is
/// absent from the upstream channel list. On the wire: a bare number or "N/A".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentValue {
    Reading(f64),
    NotAvailable,
}

pub const NOT_AVAILABLE: &str = "N/A";

impl Serialize for CurrentValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CurrentValue::Reading(v) => serializer.serialize_f64(*v),
            CurrentValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for CurrentValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(n) => {
                Ok(CurrentValue::Reading(n.as_f64().unwrap_or(f64::NAN)))
            }
            serde_json::Value::String(_) => Ok(CurrentValue::NotAvailable),
            // serde_json writes non-finite floats as null
            serde_json::Value::Null => Ok(CurrentValue::Reading(f64::NAN)),
            other => Err(D::Error::custom(format!(
                "unexpected currentValue: {other}"
            ))),
        }
    }
}

/// One chart sample; serialized as {x, y} for the chart library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(rename = "x")]
    pub timestamp: String,
    #[serde(rename = "y")]
    pub value: f64,
}

/// Device-picker row: the registry shaped for the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceListEntry {
    pub id: String,
    pub name: String,
    pub mac: String,
}
