//! Product catalog API endpoints.

use axum::extract::{Multipart, Path, State};

use super::{success, ApiResult};
use crate::models::{CatalogView, ProductDraft};
use crate::services::ImageFile;
use crate::AppState;

/// Largest accepted product upload, image included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// GET /api/products - Render the seller's catalog.
pub async fn list_products(State(state): State<AppState>) -> ApiResult<CatalogView> {
    success(state.console.render_catalog().await?)
}

/// POST /api/products - Add a product from a multipart form.
///
/// Text parts `name`, `price`, `quantity`, `description`; optional file part `image`.
/// An empty `image` part counts as no image.
pub async fn create_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<CatalogView> {
    let mut draft = ProductDraft::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                if !data.is_empty() {
                    image = Some(ImageFile {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
            }
            "name" => draft.name = field.text().await?,
            "price" => draft.price = field.text().await?,
            "quantity" => draft.quantity = field.text().await?,
            "description" => draft.description = field.text().await?,
            other => tracing::debug!(field = other, "ignoring unknown product field"),
        }
    }

    success(state.console.add_product(&draft, image).await?)
}

/// DELETE /api/products/:id - Remove a product.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<CatalogView> {
    success(state.console.delete_product(&id).await?)
}
