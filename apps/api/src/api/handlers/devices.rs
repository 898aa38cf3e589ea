use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::{AppJson, AppPath};
use crate::api::handlers::measures::MeasureResponse;
use crate::api::handlers::DetailResponse;
use crate::domain::device::{Device, DeviceFields};
use crate::domain::errors::DomainError;
use crate::domain::repositories::DeviceRepository;
use crate::infrastructure::Store;

/// Request body for creating or replacing a device
///
/// PUT uses the same shape: omitting `location` clears it.
#[derive(Debug, Deserialize)]
pub struct DeviceRequest {
    pub nom: String,
    pub mac_address: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<DeviceRequest> for DeviceFields {
    fn from(req: DeviceRequest) -> Self {
        DeviceFields::new(req.nom, req.mac_address, req.location)
    }
}

/// Device as returned by the API, with its measures nested
#[derive(Debug, Serialize)]
pub struct DeviceResponse {
    pub id: i64,
    pub nom: String,
    pub mac_address: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub mesures: Vec<MeasureResponse>,
}

impl From<&Device> for DeviceResponse {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            nom: device.name.clone(),
            mac_address: device.mac_address.clone(),
            location: device.location.clone(),
            created_at: device.created_at,
            mesures: device.measures.iter().map(MeasureResponse::from).collect(),
        }
    }
}

/// Register a new device
///
/// POST /devices/
pub async fn create_device(
    State(store): State<Store>,
    AppJson(req): AppJson<DeviceRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let fields = DeviceFields::from(req);

    let mut uow = store.begin().await?;
    let device = uow.devices().create(&fields).await?;
    uow.commit().await?;

    tracing::info!(device_id = device.id, mac_address = %device.mac_address, "device created");

    Ok(Json(DeviceResponse::from(&device)))
}

/// List all devices with their measures
///
/// GET /devices/
pub async fn list_devices(
    State(store): State<Store>,
) -> Result<Json<Vec<DeviceResponse>>, ApiError> {
    let mut uow = store.begin().await?;
    let devices = uow.devices().list().await?;
    uow.commit().await?;

    Ok(Json(devices.iter().map(DeviceResponse::from).collect()))
}

/// Get a device by ID
///
/// GET /devices/:id
pub async fn get_device(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let mut uow = store.begin().await?;
    let device = uow
        .devices()
        .find_by_id(id)
        .await?
        .ok_or(DomainError::DeviceNotFound(id))?;
    uow.commit().await?;

    Ok(Json(DeviceResponse::from(&device)))
}

/// Replace name, MAC address and location of a device
///
/// PUT /devices/:id
pub async fn update_device(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<DeviceRequest>,
) -> Result<Json<DeviceResponse>, ApiError> {
    let fields = DeviceFields::from(req);

    let mut uow = store.begin().await?;
    let device = uow.devices().update(id, &fields).await?;
    uow.commit().await?;

    Ok(Json(DeviceResponse::from(&device)))
}

/// Delete a device together with all of its measures
///
/// DELETE /devices/:id
pub async fn delete_device(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DetailResponse>, ApiError> {
    let mut uow = store.begin().await?;
    let removed = uow.devices().delete(id).await?;
    uow.commit().await?;

    tracing::info!(device_id = id, measures_removed = removed, "device deleted");

    Ok(Json(DetailResponse::new("Device deleted successfully")))
}
