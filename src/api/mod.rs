//! REST API module.
//!
//! Thin handlers over [`SellerConsole`](crate::services::SellerConsole); each
//! one maps a request onto a single console operation.

mod account;
mod catalog;
mod prediction;
mod profile;

pub use account::*;
pub use catalog::*;
pub use prediction::*;
pub use profile::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Navigation;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    /// Page the client should open next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            redirect: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Create a successful API response that also tells the client where to go.
pub fn redirect<T: Serialize>(data: T, navigate: Navigation) -> ApiResult<T> {
    Ok(ApiResponse {
        redirect: Some(navigate.path()),
        ..ApiResponse::new(data)
    })
}
