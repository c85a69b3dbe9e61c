use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local};

use super::contract::{ValuationRequest, ValuationResponse};
use super::service::ValuationService;
use crate::error::AppError;

/// Router builder exposing the valuation contract and the loaded table metadata.
pub fn valuation_router(service: Arc<ValuationService>) -> Router {
    Router::new()
        .route("/api/v1/valuation", post(appraise_handler))
        .route("/api/v1/valuation/tables", get(tables_handler))
        .with_state(service)
}

pub(crate) async fn appraise_handler(
    State(service): State<Arc<ValuationService>>,
    Json(request): Json<ValuationRequest>,
) -> Result<Json<ValuationResponse>, AppError> {
    let current_year = Local::now().year();
    let appraisal = service.appraise(request, current_year)?;
    Ok(Json(appraisal.to_response()))
}

pub(crate) async fn tables_handler(State(service): State<Arc<ValuationService>>) -> Response {
    let summary = service.engine().tables().summary();
    (StatusCode::OK, Json(summary)).into_response()
}
