// GET handlers: version, device list, current data, chart series

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;
use super::error::ApiError;
use crate::aggregate::{self, FetchRequest};
use crate::models::{ChartPoint, DeviceListEntry};
use crate::timefmt;

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/get-device-list — the static registry, shaped for the frontend
/// picker. Serves even when the upstream is down; an empty registry is an
/// empty array, not an error.
pub(super) async fn device_list_handler(
    State(state): State<AppState>,
) -> Json<Vec<DeviceListEntry>> {
    Json(state.registry.listing())
}

#[derive(Debug, Deserialize)]
pub(super) struct DataParams {
    /// Comma-separated hardware addresses (batch mode).
    devices: Option<String>,
    /// Single registry id (single mode).
    device: Option<String>,
    /// Optional batch response shape: "keyed" for the id->record object.
    shape: Option<String>,
}

/// GET /api/get-data — current readings. `devices=` and `device=` are
/// mutually exclusive; exactly one must be present.
pub(super) async fn data_handler(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> Result<Response, ApiError> {
    let client = state.client()?;
    match (params.devices, params.device) {
        (Some(_), Some(_)) => Err(ApiError::BadRequest(
            "devices and device are mutually exclusive".into(),
        )),
        (None, None) => Err(ApiError::BadRequest(
            "devices or device parameter is required".into(),
        )),
        (Some(devices), None) => {
            // reject bad shapes before spending any upstream calls
            let keyed = match params.shape.as_deref() {
                None => false,
                Some("keyed") => true,
                Some(other) => {
                    return Err(ApiError::BadRequest(format!("unknown shape '{other}'")));
                }
            };
            let macs: Vec<String> = devices
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
            if macs.is_empty() {
                return Err(ApiError::BadRequest("devices list is empty".into()));
            }
            let requests: Vec<FetchRequest> =
                macs.iter().map(|mac| fetch_request(&state, mac)).collect();
            let slots = aggregate::fetch_records(client, requests).await;
            if keyed {
                Ok(Json(aggregate::collect_keyed(&macs, slots)).into_response())
            } else {
                Ok(Json(aggregate::collect_list(slots)).into_response())
            }
        }
        (None, Some(id)) => {
            let entry = state
                .registry
                .get(&id)
                .ok_or_else(|| ApiError::NotFound(format!("unknown device id '{id}'")))?;
            let request = FetchRequest {
                mac: entry.mac.clone(),
                channel: entry.channel.clone(),
                id: Some(entry.id.clone()),
            };
            let record = aggregate::fetch_single(client, request).await.map_err(|e| {
                tracing::warn!(error = %e, device = %id, operation = "get_device_info", "single device lookup failed");
                ApiError::from(e)
            })?;
            Ok(Json(record).into_response())
        }
    }
}

/// Resolve a requested hardware address against the registry: a known MAC
/// carries its configured channel and id, an unknown one gets the default
/// channel tag.
fn fetch_request(state: &AppState, mac: &str) -> FetchRequest {
    match state.registry.find_by_mac(mac) {
        Some(entry) => FetchRequest {
            mac: entry.mac.clone(),
            channel: entry.channel.clone(),
            id: Some(entry.id.clone()),
        },
        None => FetchRequest {
            mac: mac.to_owned(),
            channel: state.config.upstream.default_channel.clone(),
            id: None,
        },
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChartParams {
    device: Option<String>,
}

/// GET /api/get-chart — two-week series for one registry device, as {x, y}
/// points in upstream order.
pub(super) async fn chart_handler(
    State(state): State<AppState>,
    Query(params): Query<ChartParams>,
) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let client = state.client()?;
    let id = params
        .device
        .ok_or_else(|| ApiError::BadRequest("device parameter is required".into()))?;
    let entry = state
        .registry
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("unknown device id '{id}'")))?;

    let (start, end) = timefmt::two_week_window(Utc::now());
    let rows = client
        .get_channel_data(
            &entry.mac,
            &entry.channel,
            &timefmt::to_compact(start),
            &timefmt::to_compact(end),
        )
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, device = %id, operation = "get_channel_data", "chart fetch failed");
            ApiError::from(e)
        })?;

    let points = rows
        .into_iter()
        .map(|row| ChartPoint {
            timestamp: timefmt::compact_to_iso(&row.date),
            value: row.val.as_f64(),
        })
        .collect();
    Ok(Json(points))
}
