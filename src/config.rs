use serde::Deserialize;

use crate::registry::DeviceEntry;

/// Environment variables holding the upstream API secrets.
pub const API_KEY_VAR: &str = "API_KEY";
pub const API_SECRET_VAR: &str = "API_SECRET";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
    /// Upstream secrets; read from the environment, never from the file.
    #[serde(skip)]
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base path of the telemetry service, without a trailing slash.
    pub base_url: String,
    /// Channel tag assumed for hardware addresses not found in the registry.
    #[serde(default = "default_channel_tag")]
    pub default_channel: String,
}

fn default_channel_tag() -> String {
    "ch1".into()
}

/// The two secret query parameters every upstream call carries.
/// Debug is redacted so the secrets can never end up in a log line.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read both secrets from the environment; absence of either is a
    /// configuration error, not a license to call the upstream unauthenticated.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|v| !v.is_empty());
        let api_secret = std::env::var(API_SECRET_VAR).ok().filter(|v| !v.is_empty());
        match (api_key, api_secret) {
            (Some(api_key), Some(api_secret)) => Ok(Self::new(api_key, api_secret)),
            _ => anyhow::bail!("{} and {} must be set and non-empty", API_KEY_VAR, API_SECRET_VAR),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").finish_non_exhaustive()
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        let mut config = Self::load_from_str(&s)?;
        config.credentials = Some(Credentials::from_env()?);
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    /// Credentials are left unset; callers fill them in separately.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            !self.upstream.base_url.is_empty(),
            "upstream.base_url must be non-empty"
        );
        anyhow::ensure!(
            !self.upstream.default_channel.is_empty(),
            "upstream.default_channel must be non-empty"
        );
        for (i, device) in self.devices.iter().enumerate() {
            anyhow::ensure!(!device.id.is_empty(), "devices[{}].id must be non-empty", i);
            anyhow::ensure!(
                !device.name.is_empty(),
                "devices[{}].name must be non-empty",
                i
            );
            anyhow::ensure!(!device.mac.is_empty(), "devices[{}].mac must be non-empty", i);
            anyhow::ensure!(
                !device.channel.is_empty(),
                "devices[{}].channel must be non-empty",
                i
            );
        }
        let mut ids: Vec<&str> = self.devices.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        anyhow::ensure!(
            ids.len() == self.devices.len(),
            "devices must have unique ids"
        );
        Ok(())
    }
}
