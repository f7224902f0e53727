//! Seller workflows: accounts, profile, catalog, account deletion and
//! variety predictions.
//!
//! [`SellerConsole`] wires the identity provider, the document store and the
//! session cache together. Each workflow lives in its own submodule as an
//! `impl SellerConsole` block.

mod account;
mod catalog;
mod deletion;
mod image;
mod prediction;
mod profile;

#[cfg(test)]
pub(crate) mod testing;

pub use image::{encode_data_uri, ImageFile};

use std::sync::Arc;

use crate::config::AdminProfile;
use crate::db::DocumentStore;
use crate::errors::AppError;
use crate::identity::IdentityClient;
use crate::session::SessionCache;

pub struct SellerConsole {
    identity: Arc<dyn IdentityClient>,
    store: Arc<dyn DocumentStore>,
    session: Arc<SessionCache>,
    admin: AdminProfile,
}

impl SellerConsole {
    pub fn new(
        identity: Arc<dyn IdentityClient>,
        store: Arc<dyn DocumentStore>,
        session: Arc<SessionCache>,
        admin: AdminProfile,
    ) -> Self {
        Self {
            identity,
            store,
            session,
            admin,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionCache {
        &self.session
    }
}

/// Fail with `Validation` unless every named field has non-blank content.
fn require_fields(fields: &[(&str, &str)], message: &str) -> Result<(), AppError> {
    if fields.iter().any(|(_, value)| value.trim().is_empty()) {
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        tracing::debug!(?missing, "rejected incomplete form");
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}
