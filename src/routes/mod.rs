// HTTP routes

mod error;
mod http;

pub use error::ApiError;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::registry::DeviceRegistry;
use crate::upstream::UpstreamClient;

#[derive(Clone)]
pub(crate) struct AppState {
    /// None when the server was built without credentials; handlers refuse
    /// with a configuration error before any upstream call.
    pub(crate) client: Option<UpstreamClient>,
    pub(crate) registry: DeviceRegistry,
    pub(crate) config: AppConfig,
}

impl AppState {
    pub(crate) fn client(&self) -> Result<&UpstreamClient, ApiError> {
        self.client.as_ref().ok_or(ApiError::Config)
    }
}

pub fn app(config: AppConfig) -> Router {
    let registry = DeviceRegistry::new(config.devices.clone());
    let client = config
        .credentials
        .clone()
        .map(|credentials| UpstreamClient::new(&config.upstream, credentials));
    let state = AppState {
        client,
        registry,
        config,
    };
    Router::new()
        .route("/", get(|| async { "sensordash: dashboard backend up" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/get-device-list", get(http::device_list_handler)) // GET /api/get-device-list
        .route("/api/get-data", get(http::data_handler)) // GET /api/get-data
        .route("/api/get-chart", get(http::chart_handler)) // GET /api/get-chart
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
