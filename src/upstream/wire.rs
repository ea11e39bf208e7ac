// Wire shapes of the telemetry API

use serde::Deserialize;

use crate::models::CurrentValue;
use crate::timefmt;

/// Upstream bodies are duck-typed JSON: decode into the expected shape, or
/// keep the raw value so the caller can classify it as malformed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Body<T> {
    Expected(T),
    Malformed(serde_json::Value),
}

/// Body of `device/get_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInfoBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mac: String,
    pub channels: Vec<ChannelReading>,
}

impl DeviceInfoBody {
    /// Latest reading on the given channel tag. A missing tag is not an
    /// error; it yields the "not available" sentinel.
    pub fn channel_value(&self, channel: &str) -> CurrentValue {
        self.channels
            .iter()
            .find(|c| c.ch == channel)
            .map(|c| CurrentValue::Reading(c.val.as_f64()))
            .unwrap_or(CurrentValue::NotAvailable)
    }
}

/// One entry of the `channels` array: channel tag + latest value.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelReading {
    pub ch: String,
    pub val: RawValue,
}

/// Body of `channel/get_data_list`.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesBody {
    pub data_list: Vec<SampleRow>,
}

/// One sample row, exactly as the upstream sends it: compact date + value.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRow {
    pub date: String,
    pub val: RawValue,
}

/// The upstream emits numbers and numeric strings interchangeably.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            RawValue::Number(v) => *v,
            RawValue::Text(s) => timefmt::parse_value(s),
        }
    }
}
