// Telemetry API client

mod wire;

pub use wire::{ChannelReading, DeviceInfoBody, RawValue, SampleRow};

use thiserror::Error;
use wire::{Body, SeriesBody};

use crate::config::{Credentials, UpstreamConfig};

/// One failed upstream call. Detail is for the log; clients of the HTTP
/// surface only ever see a generic message.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream body did not match the expected shape")]
    Malformed,
}

/// Client for the fixed telemetry service. Credentials ride along as query
/// parameters on every call; no retries, no timeout beyond the transport
/// default.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    /// GET `device/get_info` for one hardware address.
    pub async fn get_device_info(&self, mac: &str) -> Result<DeviceInfoBody, UpstreamError> {
        let url = format!("{}/device/get_info", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.credentials.api_key.as_str()),
                ("api_secret", self.credentials.api_secret.as_str()),
                ("MAC", mac),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        match response.json::<Body<DeviceInfoBody>>().await? {
            Body::Expected(body) => Ok(body),
            Body::Malformed(_) => {
                tracing::warn!(%mac, operation = "get_device_info", "unexpected upstream body shape");
                Err(UpstreamError::Malformed)
            }
        }
    }

    /// GET `channel/get_data_list` for one hardware address, channel tag and
    /// compact date range. Rows come back in upstream order.
    pub async fn get_channel_data(
        &self,
        mac: &str,
        channel: &str,
        sdate: &str,
        edate: &str,
    ) -> Result<Vec<SampleRow>, UpstreamError> {
        let url = format!("{}/channel/get_data_list", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.credentials.api_key.as_str()),
                ("api_secret", self.credentials.api_secret.as_str()),
                ("MAC", mac),
                ("ch", channel),
                ("sdate", sdate),
                ("edate", edate),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        match response.json::<Body<SeriesBody>>().await? {
            Body::Expected(body) => Ok(body.data_list),
            Body::Malformed(_) => {
                tracing::warn!(%mac, %channel, operation = "get_channel_data", "unexpected upstream body shape");
                Err(UpstreamError::Malformed)
            }
        }
    }
}
