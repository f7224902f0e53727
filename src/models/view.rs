//! View models returned in place of page updates, plus navigation signals.

use serde::Serialize;

use super::{Product, SellerProfile};

/// Placeholder shown when the seller name is missing.
pub const NAME_PLACEHOLDER: &str = "Seller";
/// Placeholder shown for any other missing profile field.
pub const FIELD_PLACEHOLDER: &str = "N/A";
/// Role shown when none is known.
pub const ROLE_PLACEHOLDER: &str = "User";

/// Where the caller should go after an operation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Navigation {
    /// Login entry point
    Entry,
    Dashboard,
    Admin,
}

impl Navigation {
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Entry => "/index.html",
            Navigation::Dashboard => "/dashboard.html",
            Navigation::Admin => "/admin.html",
        }
    }
}

/// A result paired with a navigation signal.
#[derive(Debug, Clone)]
pub struct Navigated<T> {
    pub data: T,
    pub navigate: Navigation,
}

/// Read-only profile display with placeholders substituted.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDisplay {
    pub name: String,
    pub email: String,
    pub address: String,
    pub contact: String,
    pub farm_name: String,
    pub role: String,
}

/// Values for the editable profile fields.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub farm_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProfileView {
    pub display: ProfileDisplay,
    pub form: ProfileForm,
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

impl ProfileView {
    pub fn from_profile(profile: Option<&SellerProfile>) -> Self {
        let Some(profile) = profile else {
            return Self {
                display: ProfileDisplay {
                    name: NAME_PLACEHOLDER.to_string(),
                    email: FIELD_PLACEHOLDER.to_string(),
                    address: FIELD_PLACEHOLDER.to_string(),
                    contact: FIELD_PLACEHOLDER.to_string(),
                    farm_name: FIELD_PLACEHOLDER.to_string(),
                    role: ROLE_PLACEHOLDER.to_string(),
                },
                form: ProfileForm::default(),
            };
        };

        Self {
            display: ProfileDisplay {
                name: or_placeholder(&profile.name, NAME_PLACEHOLDER),
                email: or_placeholder(&profile.email, FIELD_PLACEHOLDER),
                address: or_placeholder(&profile.address, FIELD_PLACEHOLDER),
                contact: or_placeholder(&profile.contact, FIELD_PLACEHOLDER),
                farm_name: or_placeholder(&profile.farm_name, FIELD_PLACEHOLDER),
                role: profile.role.as_str().to_string(),
            },
            form: ProfileForm {
                name: profile.name.clone(),
                address: profile.address.clone(),
                contact: profile.contact.clone(),
                farm_name: profile.farm_name.clone(),
            },
        }
    }
}

/// Product thumbnail cell.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "src", rename_all = "camelCase")]
pub enum Thumbnail {
    Image(String),
    Placeholder,
}

/// Control bound to a single catalog row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RowAction {
    #[serde(rename_all = "camelCase")]
    Delete { product_id: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRow {
    pub id: String,
    pub thumbnail: Thumbnail,
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    pub actions: Vec<RowAction>,
}

impl From<Product> for CatalogRow {
    fn from(product: Product) -> Self {
        let thumbnail = if product.image.is_empty() {
            Thumbnail::Placeholder
        } else {
            Thumbnail::Image(product.image)
        };
        Self {
            actions: vec![RowAction::Delete {
                product_id: product.id.clone(),
            }],
            id: product.id,
            thumbnail,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            description: product.description,
        }
    }
}

/// The product table, rebuilt from scratch on every render.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct CatalogView {
    pub rows: Vec<CatalogRow>,
}

/// Initial load of an authenticated view.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub profile: ProfileView,
    pub catalog: CatalogView,
}
