//! Product catalog of the signed-in seller.

use super::{encode_data_uri, require_fields, ImageFile, SellerConsole};
use crate::errors::AppError;
use crate::models::{CatalogRow, CatalogView, NewProduct, ProductDraft};

impl SellerConsole {
    /// Add a product, encoding its image first when one is attached.
    ///
    /// Nothing is written until the image is fully encoded.
    pub async fn add_product(
        &self,
        draft: &ProductDraft,
        image: Option<ImageFile>,
    ) -> Result<CatalogView, AppError> {
        require_fields(
            &[
                ("name", draft.name.as_str()),
                ("price", draft.price.as_str()),
                ("quantity", draft.quantity.as_str()),
            ],
            "Product name, price, and quantity are required.",
        )?;
        let active = self.session.require().await?;

        let image = image.as_ref().map(encode_data_uri).unwrap_or_default();

        let product = self
            .store
            .add_product(
                &active.seller_id,
                &NewProduct {
                    name: draft.name.clone(),
                    price: draft.price.clone(),
                    quantity: draft.quantity.clone(),
                    description: draft.description.clone(),
                    image,
                },
            )
            .await?;
        tracing::debug!(seller_id = %active.seller_id, product_id = %product.id, "product added");

        self.render_catalog().await
    }

    /// Rebuild the product table from the store. Unpaged.
    pub async fn render_catalog(&self) -> Result<CatalogView, AppError> {
        let active = self.session.require().await?;
        let products = self.store.list_products(&active.seller_id).await?;

        Ok(CatalogView {
            rows: products.into_iter().map(CatalogRow::from).collect(),
        })
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<CatalogView, AppError> {
        let active = self.session.require().await?;
        self.store
            .delete_product(&active.seller_id, product_id)
            .await?;
        tracing::debug!(seller_id = %active.seller_id, product_id, "product deleted");

        self.render_catalog().await
    }
}
