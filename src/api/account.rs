//! Account API endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;

use super::{redirect, success, ApiResult};
use crate::models::{DashboardView, LoginRequest, RegisterRequest, Seller};
use crate::AppState;

/// Request body for deleting the signed-in account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteAccountRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/auth/register - Create an account and seller profile.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Seller> {
    let outcome = state.console.register(&request).await?;
    redirect(outcome.data, outcome.navigate)
}

/// POST /api/auth/login - Sign in and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Seller> {
    let outcome = state.console.login(&request).await?;
    redirect(outcome.data, outcome.navigate)
}

/// POST /api/auth/logout - End the session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    let navigate = state.console.logout().await?;
    redirect((), navigate)
}

/// GET /api/dashboard - Profile and catalog in one response.
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardView> {
    success(state.console.dashboard().await?)
}

/// DELETE /api/account - Delete the signed-in seller and everything it owns.
pub async fn delete_account(
    State(state): State<AppState>,
    Json(request): Json<DeleteAccountRequest>,
) -> ApiResult<()> {
    let navigate = state.console.delete_account(request.confirm).await?;
    redirect((), navigate)
}
