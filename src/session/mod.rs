//! Active seller session, mirrored to persistent slots.
//!
//! The in-memory [`Session`] is loaded once from the slots at startup and
//! every change is written to the slots before memory is updated, so a failed
//! write leaves the session as it was.

mod slots;

pub use slots::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::SellerProfile;

/// Slot holding the active seller id.
pub const SELLER_ID_SLOT: &str = "sellerId";
/// Slot holding the serialized seller profile snapshot.
pub const SELLER_DATA_SLOT: &str = "sellerData";
/// Slot holding an unfinished account deletion.
pub const ACCOUNT_DELETION_SLOT: &str = "accountDeletion";

/// The signed-in seller and a denormalized copy of its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub seller_id: String,
    pub profile: SellerProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Active(ActiveSession),
}

impl Session {
    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            Session::Active(active) => Some(active),
            Session::Anonymous => None,
        }
    }
}

/// Steps of the account deletion cascade, in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeletionStage {
    Pending,
    ProductsDeleted,
    SellerDeleted,
    IdentityDeleted,
    Complete,
}

/// Last completed deletion step for a seller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeletionProgress {
    pub seller_id: String,
    pub stage: DeletionStage,
}

/// Holds the current session and keeps the slots in step with it.
pub struct SessionCache {
    slots: Arc<dyn SlotStore>,
    current: RwLock<Session>,
}

impl SessionCache {
    /// Create an anonymous cache over `slots`. Call [`load`](Self::load) to
    /// pick up a persisted session.
    pub fn new(slots: Arc<dyn SlotStore>) -> Self {
        Self {
            slots,
            current: RwLock::new(Session::Anonymous),
        }
    }

    /// Read the persisted slots into memory.
    ///
    /// A seller id without a readable profile snapshot loads as anonymous.
    pub async fn load(&self) -> Result<Session, AppError> {
        let seller_id = self.slots.get(SELLER_ID_SLOT).await?;
        let seller_data = self.slots.get(SELLER_DATA_SLOT).await?;

        let session = match (seller_id, seller_data) {
            (Some(seller_id), Some(data)) if !seller_id.is_empty() => {
                match serde_json::from_str::<SellerProfile>(&data) {
                    Ok(profile) => Session::Active(ActiveSession { seller_id, profile }),
                    Err(e) => {
                        tracing::warn!("Ignoring unreadable seller snapshot: {}", e);
                        Session::Anonymous
                    }
                }
            }
            _ => Session::Anonymous,
        };

        *self.current.write().await = session.clone();
        Ok(session)
    }

    pub async fn current(&self) -> Session {
        self.current.read().await.clone()
    }

    /// The active session, or `NoSession`.
    pub async fn require(&self) -> Result<ActiveSession, AppError> {
        self.current
            .read()
            .await
            .active()
            .cloned()
            .ok_or(AppError::NoSession)
    }

    /// Start a session for `seller_id`.
    pub async fn establish(&self, seller_id: &str, profile: SellerProfile) -> Result<(), AppError> {
        self.slots
            .set(SELLER_ID_SLOT, seller_id.to_string())
            .await?;
        self.slots
            .set(SELLER_DATA_SLOT, serde_json::to_string(&profile)?)
            .await?;

        *self.current.write().await = Session::Active(ActiveSession {
            seller_id: seller_id.to_string(),
            profile,
        });
        Ok(())
    }

    /// Replace the profile snapshot of the active session.
    pub async fn refresh_profile(&self, profile: SellerProfile) -> Result<(), AppError> {
        let mut current = self.current.write().await;
        let Session::Active(active) = &mut *current else {
            return Err(AppError::NoSession);
        };

        self.slots
            .set(SELLER_DATA_SLOT, serde_json::to_string(&profile)?)
            .await?;
        active.profile = profile;
        Ok(())
    }

    /// Drop the session and every persisted slot.
    pub async fn clear(&self) -> Result<(), AppError> {
        let mut current = self.current.write().await;
        for slot in [SELLER_ID_SLOT, SELLER_DATA_SLOT, ACCOUNT_DELETION_SLOT] {
            self.slots.remove(slot).await?;
        }

        *current = Session::Anonymous;
        Ok(())
    }

    /// Unfinished deletion recorded for `seller_id`, if any.
    pub async fn deletion_progress(
        &self,
        seller_id: &str,
    ) -> Result<Option<DeletionProgress>, AppError> {
        let Some(raw) = self.slots.get(ACCOUNT_DELETION_SLOT).await? else {
            return Ok(None);
        };
        let progress: DeletionProgress = serde_json::from_str(&raw)?;
        Ok((progress.seller_id == seller_id).then_some(progress))
    }

    pub async fn record_deletion(&self, progress: &DeletionProgress) -> Result<(), AppError> {
        self.slots
            .set(ACCOUNT_DELETION_SLOT, serde_json::to_string(progress)?)
            .await
    }
}
