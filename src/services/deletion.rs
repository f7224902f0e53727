//! Account deletion cascade.
//!
//! Products go first, then the seller document, then the identity account.
//! Each completed step is recorded in the session slots so a retry after a
//! failure continues where the last attempt stopped. Completed steps are
//! never rolled back. Until the seller document is gone the product sweep
//! runs again on every attempt, since the session stays usable in between.

use super::SellerConsole;
use crate::errors::AppError;
use crate::models::Navigation;
use crate::session::{DeletionProgress, DeletionStage};

impl SellerConsole {
    /// Delete the signed-in seller's products, document and identity account.
    ///
    /// `confirmed` must be true; nothing is touched otherwise.
    pub async fn delete_account(&self, confirmed: bool) -> Result<Navigation, AppError> {
        if !confirmed {
            return Err(AppError::Validation(
                "Account deletion must be confirmed.".to_string(),
            ));
        }
        let active = self.session.require().await?;
        let seller_id = active.seller_id.as_str();

        let mut stage = self
            .session
            .deletion_progress(seller_id)
            .await?
            .map(|progress| progress.stage)
            .unwrap_or(DeletionStage::Pending);
        if stage != DeletionStage::Pending {
            tracing::info!(seller_id, ?stage, "resuming account deletion");
        }
        if stage < DeletionStage::SellerDeleted {
            stage = DeletionStage::Pending;
        }

        if stage < DeletionStage::IdentityDeleted {
            let current = self.identity.current_user().await;
            if current.as_deref() != Some(seller_id) {
                tracing::warn!(seller_id, ?current, "identity out of step with session");
                self.identity.resume(seller_id).await;
            }
        }

        loop {
            stage = match stage {
                DeletionStage::Pending => {
                    let products = self.store.list_products(seller_id).await?;
                    for product in &products {
                        self.store.delete_product(seller_id, &product.id).await?;
                    }
                    tracing::info!(seller_id, count = products.len(), "seller products deleted");
                    DeletionStage::ProductsDeleted
                }
                DeletionStage::ProductsDeleted => {
                    self.store.delete_seller(seller_id).await?;
                    tracing::info!(seller_id, "seller document deleted");
                    DeletionStage::SellerDeleted
                }
                DeletionStage::SellerDeleted => {
                    self.identity.delete_current_user().await?;
                    DeletionStage::IdentityDeleted
                }
                DeletionStage::IdentityDeleted => {
                    self.session.clear().await?;
                    DeletionStage::Complete
                }
                DeletionStage::Complete => break,
            };

            if stage != DeletionStage::Complete {
                self.session
                    .record_deletion(&DeletionProgress {
                        seller_id: seller_id.to_string(),
                        stage,
                    })
                    .await?;
            }
        }

        tracing::info!(seller_id, "seller account deleted");
        Ok(Navigation::Entry)
    }
}
