use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::extract::{AppJson, AppPath};
use crate::api::handlers::DetailResponse;
use crate::domain::errors::DomainError;
use crate::domain::measure::{Measure, MeasureFields};
use crate::domain::repositories::MeasureRepository;
use crate::infrastructure::Store;

/// Request body for creating a measure
#[derive(Debug, Deserialize)]
pub struct CreateMeasureRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub mesure_value: f64,
    pub device_id: i64,
}

/// Request body for updating a measure
///
/// Owner and timestamp are not part of it; extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct UpdateMeasureRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub mesure_value: f64,
}

/// Measure as returned by the API
#[derive(Debug, Serialize)]
pub struct MeasureResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub mesure_value: f64,
    pub date: DateTime<Utc>,
}

impl From<&Measure> for MeasureResponse {
    fn from(measure: &Measure) -> Self {
        Self {
            id: measure.id,
            kind: measure.kind.clone(),
            mesure_value: measure.value,
            date: measure.recorded_at,
        }
    }
}

/// Create a measure for an existing device
///
/// Answers 404 when `device_id` names no device.
///
/// POST /measures/
pub async fn create_measure(
    State(store): State<Store>,
    AppJson(req): AppJson<CreateMeasureRequest>,
) -> Result<Json<MeasureResponse>, ApiError> {
    let fields = MeasureFields::new(&req.kind, req.mesure_value);

    let mut uow = store.begin().await?;
    let measure = uow.measures().create(req.device_id, &fields).await?;
    uow.commit().await?;

    tracing::info!(
        measure_id = measure.id,
        device_id = measure.device_id,
        kind = %measure.kind,
        "measure created"
    );

    Ok(Json(MeasureResponse::from(&measure)))
}

/// List all measures
///
/// GET /measures/
pub async fn list_measures(
    State(store): State<Store>,
) -> Result<Json<Vec<MeasureResponse>>, ApiError> {
    let mut uow = store.begin().await?;
    let measures = uow.measures().list().await?;
    uow.commit().await?;

    Ok(Json(measures.iter().map(MeasureResponse::from).collect()))
}

/// Get a measure by ID
///
/// GET /measures/:id
pub async fn get_measure(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MeasureResponse>, ApiError> {
    let mut uow = store.begin().await?;
    let measure = uow
        .measures()
        .find_by_id(id)
        .await?
        .ok_or(DomainError::MeasureNotFound(id))?;
    uow.commit().await?;

    Ok(Json(MeasureResponse::from(&measure)))
}

/// Replace type and value of a measure
///
/// PUT /measures/:id
pub async fn update_measure(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateMeasureRequest>,
) -> Result<Json<MeasureResponse>, ApiError> {
    let fields = MeasureFields::new(&req.kind, req.mesure_value);

    let mut uow = store.begin().await?;
    let measure = uow.measures().update(id, &fields).await?;
    uow.commit().await?;

    Ok(Json(MeasureResponse::from(&measure)))
}

/// Delete a measure
///
/// DELETE /measures/:id
pub async fn delete_measure(
    State(store): State<Store>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<DetailResponse>, ApiError> {
    let mut uow = store.begin().await?;
    uow.measures().delete(id).await?;
    uow.commit().await?;

    tracing::info!(measure_id = id, "measure deleted");

    Ok(Json(DetailResponse::new("Measure deleted successfully")))
}
