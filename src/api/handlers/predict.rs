use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;

use super::AppState;
use crate::error::{Result, YieldError};
use crate::models::{PredictionRequest, PredictionResponse};

/// Predict crop yield for one agricultural record
#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction produced", body = PredictionResponse),
        (status = 400, description = "Unrecognised categorical value", body = crate::models::CategoryErrorBody),
        (status = 422, description = "Missing, wrong-typed, or out-of-range field", body = crate::models::ValidationErrorBody),
        (status = 500, description = "Prediction failed", body = crate::models::ErrorBody)
    )
)]
pub async fn predict_yield(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PredictionResponse>)> {
    // Unparsable bodies surface as validation errors, not axum's plain-text rejection.
    let Json(body) =
        payload.map_err(|rejection| YieldError::invalid_field("body", rejection.body_text()))?;
    let request = PredictionRequest::from_json(body)?;

    let predicted = state.service.predict(&request)?;

    Ok((
        StatusCode::OK,
        Json(PredictionResponse {
            predicted_yield_ton_per_ha: predicted,
        }),
    ))
}
