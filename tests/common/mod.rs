// Shared test helpers: a canned upstream server and config builders

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use sensordash::config::{AppConfig, Credentials};

/// What the stub answers for one hardware address.
#[derive(Clone)]
pub enum DeviceResponse {
    /// 200 with this JSON body.
    Ok(serde_json::Value),
    /// This HTTP status with an error body.
    Error(u16),
}

/// Canned telemetry upstream: serves `device/get_info` and
/// `channel/get_data_list` from fixed tables, counting hits. Requests
/// without both credential parameters are rejected with 401 so tests catch
/// any call that forgot to forward the secrets.
#[derive(Clone)]
pub struct StubUpstream {
    pub info_hits: Arc<AtomicUsize>,
    pub series_hits: Arc<AtomicUsize>,
    devices: Arc<HashMap<String, DeviceResponse>>,
    series: Arc<serde_json::Value>,
}

impl StubUpstream {
    pub fn new(devices: HashMap<String, DeviceResponse>, series: serde_json::Value) -> Self {
        Self {
            info_hits: Arc::new(AtomicUsize::new(0)),
            series_hits: Arc::new(AtomicUsize::new(0)),
            devices: Arc::new(devices),
            series: Arc::new(series),
        }
    }

    /// Bind to an ephemeral port and serve in the background.
    /// Returns the base URL to point the client at.
    pub async fn spawn(self) -> String {
        let app = Router::new()
            .route("/device/get_info", get(get_info))
            .route("/channel/get_data_list", get(get_data_list))
            .with_state(self);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

fn authenticated(params: &HashMap<String, String>) -> bool {
    params.get("api_key").is_some_and(|v| !v.is_empty())
        && params.get("api_secret").is_some_and(|v| !v.is_empty())
}

async fn get_info(
    State(stub): State<StubUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.info_hits.fetch_add(1, Ordering::SeqCst);
    if !authenticated(&params) {
        return error_response(StatusCode::UNAUTHORIZED);
    }
    let mac = params.get("MAC").cloned().unwrap_or_default();
    match stub.devices.get(&mac) {
        Some(DeviceResponse::Ok(body)) => Json(body.clone()).into_response(),
        Some(DeviceResponse::Error(code)) => {
            error_response(StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR))
        }
        None => error_response(StatusCode::NOT_FOUND),
    }
}

async fn get_data_list(
    State(stub): State<StubUpstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.series_hits.fetch_add(1, Ordering::SeqCst);
    if !authenticated(&params) {
        return error_response(StatusCode::UNAUTHORIZED);
    }
    if params.get("sdate").is_none() || params.get("edate").is_none() {
        return error_response(StatusCode::BAD_REQUEST);
    }
    Json(stub.series.as_ref().clone()).into_response()
}

fn error_response(status: StatusCode) -> Response {
    (status, Json(serde_json::json!({ "error": "stub upstream" }))).into_response()
}

/// `device/get_info` body with the given channel readings.
pub fn info_body(
    name: &str,
    mac: &str,
    channels: &[(&str, serde_json::Value)],
) -> serde_json::Value {
    let channels: Vec<serde_json::Value> = channels
        .iter()
        .map(|(ch, val)| serde_json::json!({ "ch": ch, "val": val }))
        .collect();
    serde_json::json!({ "name": name, "mac": mac, "channels": channels })
}

/// `channel/get_data_list` body from (compact date, value string) rows.
pub fn series_body(rows: &[(&str, &str)]) -> serde_json::Value {
    let data_list: Vec<serde_json::Value> = rows
        .iter()
        .map(|(date, val)| serde_json::json!({ "date": date, "val": val }))
        .collect();
    serde_json::json!({ "data_list": data_list })
}

pub fn test_config_toml(base_url: &str) -> String {
    format!(
        r#"
[server]
port = 8080
host = "127.0.0.1"

[upstream]
base_url = "{base_url}"

[[devices]]
id = "1"
name = "Plant 1"
mac = "608A108370B0"
channel = "ch1"

[[devices]]
id = "2"
name = "Plant 2"
mac = "ABC123456789"
channel = "ch2"
"#
    )
}

pub fn test_credentials() -> Credentials {
    Credentials::new("test-key", "test-secret")
}

/// Config pointed at the given upstream, registry of two devices,
/// credentials filled in.
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::load_from_str(&test_config_toml(base_url)).unwrap();
    config.credentials = Some(test_credentials());
    config
}
