//! Seller profile document and the account request bodies.

use serde::{Deserialize, Serialize};

/// Seller role. Fixed at registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "User" => Some(Role::User),
            _ => None,
        }
    }
}

/// The seller document stored at `sellers/{id}`.
///
/// Also the denormalized snapshot kept in the session cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub farm_name: String,
    #[serde(default)]
    pub role: Role,
}

/// A seller document together with its key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    #[serde(flatten)]
    pub profile: SellerProfile,
}

/// Request body for registering a new seller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub farm_name: String,
}

/// Request body for signing in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The four user-editable profile fields.
///
/// Email and role are not editable after registration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub farm_name: String,
}

impl SellerProfile {
    /// Overlay the editable fields, keeping email and role.
    pub fn merged_with(&self, update: &ProfileUpdate) -> Self {
        Self {
            name: update.name.clone(),
            address: update.address.clone(),
            contact: update.contact.clone(),
            farm_name: update.farm_name.clone(),
            ..self.clone()
        }
    }
}
