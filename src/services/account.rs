//! Registration, login, logout and startup.

use super::{require_fields, SellerConsole};
use crate::errors::AppError;
use crate::models::{
    DashboardView, LoginRequest, Navigated, Navigation, RegisterRequest, Role, Seller,
    SellerProfile,
};
use crate::session::Session;

impl SellerConsole {
    /// Create an identity account and its seller document.
    ///
    /// Does not sign the seller in; the caller is sent back to the login page.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<Navigated<Seller>, AppError> {
        require_fields(
            &[
                ("name", request.name.as_str()),
                ("email", request.email.as_str()),
                ("password", request.password.as_str()),
            ],
            "Name, email, and password are required.",
        )?;

        let uid = self
            .identity
            .create_account(&request.email, &request.password)
            .await?;

        let profile = self.profile_for_registration(request);
        // No compensation: a failed write here leaves an identity account
        // without a seller document.
        self.store.set_seller(&uid, &profile).await?;

        tracing::info!(seller_id = %uid, role = profile.role.as_str(), "seller registered");

        Ok(Navigated {
            data: Seller { id: uid, profile },
            navigate: Navigation::Entry,
        })
    }

    fn profile_for_registration(&self, request: &RegisterRequest) -> SellerProfile {
        if request.email == self.admin.email {
            return SellerProfile {
                name: self.admin.name.clone(),
                email: self.admin.email.clone(),
                address: self.admin.address.clone(),
                contact: self.admin.contact.clone(),
                farm_name: self.admin.farm_name.clone(),
                role: Role::Admin,
            };
        }

        SellerProfile {
            name: request.name.clone(),
            email: request.email.clone(),
            address: request.address.clone(),
            contact: request.contact.clone(),
            farm_name: request.farm_name.clone(),
            role: Role::User,
        }
    }

    /// Sign in and start a session from the seller document.
    pub async fn login(&self, request: &LoginRequest) -> Result<Navigated<Seller>, AppError> {
        require_fields(
            &[
                ("email", request.email.as_str()),
                ("password", request.password.as_str()),
            ],
            "Email and password are required.",
        )?;

        let uid = self
            .identity
            .sign_in(&request.email, &request.password)
            .await?;

        match self.start_session(uid).await {
            Ok(seller) => {
                let navigate = match seller.profile.role {
                    Role::Admin => Navigation::Admin,
                    Role::User => Navigation::Dashboard,
                };
                tracing::info!(seller_id = %seller.id, ?navigate, "seller signed in");
                Ok(Navigated {
                    data: seller,
                    navigate,
                })
            }
            Err(e) => {
                self.restore_identity().await;
                Err(e)
            }
        }
    }

    async fn start_session(&self, uid: String) -> Result<Seller, AppError> {
        let Some(profile) = self.store.get_seller(&uid).await? else {
            tracing::warn!(seller_id = %uid, "identity account has no seller profile");
            return Err(AppError::NotFound(
                "No seller profile exists for this account.".to_string(),
            ));
        };

        self.session.establish(&uid, profile.clone()).await?;
        Ok(Seller { id: uid, profile })
    }

    /// Point the identity client back at the session's seller, or sign out
    /// when there is no session.
    async fn restore_identity(&self) {
        match self.session.current().await.active() {
            Some(active) => self.identity.resume(&active.seller_id).await,
            None => self.identity.sign_out().await,
        }
    }

    /// Sign out and forget the session. Leaves stored documents alone.
    pub async fn logout(&self) -> Result<Navigation, AppError> {
        self.identity.sign_out().await;
        self.session.clear().await?;
        tracing::info!("seller signed out");
        Ok(Navigation::Entry)
    }

    /// Load the persisted session and resume the identity sign-in.
    pub async fn bootstrap(&self) -> Result<Session, AppError> {
        let session = self.session.load().await?;
        if let Some(active) = session.active() {
            self.identity.resume(&active.seller_id).await;
            tracing::info!(seller_id = %active.seller_id, "restored seller session");
        }
        Ok(session)
    }

    /// Profile and catalog for the initial page load.
    pub async fn dashboard(&self) -> Result<DashboardView, AppError> {
        Ok(DashboardView {
            profile: self.render_profile().await,
            catalog: self.render_catalog().await?,
        })
    }
}
