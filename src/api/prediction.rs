//! Variety prediction API endpoint.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{Prediction, PredictionRequest};
use crate::AppState;

/// POST /api/predict - Describe a predicted coconut variety.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> ApiResult<Prediction> {
    success(state.console.predict(&request).await)
}
