use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use super::catalog::{DiseaseId, DiseaseListing, DiseaseProfile};
use super::consultation::{ConsultationReport, ConsultationRequest, ConsultationService};
use crate::error::AppError;

/// Router exposing consultations and catalog browsing.
pub fn diagnosis_router(service: Arc<ConsultationService>) -> Router {
    Router::new()
        .route("/api/v1/consultations", post(consult_handler))
        .route("/api/v1/diseases", get(list_diseases_handler))
        .route("/api/v1/diseases/:disease_id", get(disease_handler))
        .with_state(service)
}

pub(crate) async fn consult_handler(
    State(service): State<Arc<ConsultationService>>,
    Json(request): Json<ConsultationRequest>,
) -> Result<Json<ConsultationReport>, AppError> {
    let report = service.consult(request)?;
    info!(
        outcome = ?report.outcome,
        results = report.results.len(),
        "consultation served"
    );
    Ok(Json(report))
}

pub(crate) async fn list_diseases_handler(
    State(service): State<Arc<ConsultationService>>,
) -> Json<Vec<DiseaseListing>> {
    Json(service.engine().catalog().listings())
}

pub(crate) async fn disease_handler(
    State(service): State<Arc<ConsultationService>>,
    Path(disease_id): Path<DiseaseId>,
) -> Result<Json<DiseaseProfile>, AppError> {
    service
        .engine()
        .catalog()
        .get(disease_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::UnknownDisease(disease_id))
}
