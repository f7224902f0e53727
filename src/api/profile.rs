//! Profile API endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::models::{ProfileUpdate, ProfileView};
use crate::AppState;

/// GET /api/profile - Current profile with placeholders.
pub async fn get_profile(State(state): State<AppState>) -> ApiResult<ProfileView> {
    success(state.console.render_profile().await)
}

/// PUT /api/profile - Update the editable profile fields.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileUpdate>,
) -> ApiResult<ProfileView> {
    success(state.console.update_profile(&request).await?)
}
