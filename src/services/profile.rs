//! Profile editing and display.

use super::SellerConsole;
use crate::errors::AppError;
use crate::models::{ProfileUpdate, ProfileView};

impl SellerConsole {
    /// Overlay the editable fields and write the result to the seller document.
    ///
    /// The session snapshot changes only after the store accepted the write.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileView, AppError> {
        let active = self.session.require().await?;
        let merged = active.profile.merged_with(update);

        self.store
            .update_seller(&active.seller_id, &merged)
            .await
            .map_err(AppError::into_persistence)?;

        self.session.refresh_profile(merged).await?;
        tracing::info!(seller_id = %active.seller_id, "seller profile updated");

        Ok(self.render_profile().await)
    }

    /// Profile display from the in-memory session only.
    pub async fn render_profile(&self) -> ProfileView {
        let session = self.session.current().await;
        ProfileView::from_profile(session.active().map(|active| &active.profile))
    }
}
