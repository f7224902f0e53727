//! Configuration module for the seller console.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (identity accounts, sellers, products)
    pub db_path: PathBuf,
    /// Path to the persisted session slots
    pub session_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Directory the HTML pages are served from
    pub static_dir: PathBuf,
    /// Profile forced onto registrations using the administrator email
    pub admin: AdminProfile,
}

/// Fixed administrator identity.
///
/// A registration whose email equals `email` exactly gets these values and the
/// `Admin` role, whatever was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    pub email: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub farm_name: String,
}

impl Default for AdminProfile {
    fn default() -> Self {
        Self {
            email: "admin@sellerconsole.local".to_string(),
            name: "Administrator".to_string(),
            address: "Main Office".to_string(),
            contact: "N/A".to_string(),
            farm_name: "Seller Console".to_string(),
        }
    }
}

impl AdminProfile {
    /// Load the administrator profile, falling back to the built-in defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email: env::var("SELLER_ADMIN_EMAIL").unwrap_or(defaults.email),
            name: env::var("SELLER_ADMIN_NAME").unwrap_or(defaults.name),
            address: env::var("SELLER_ADMIN_ADDRESS").unwrap_or(defaults.address),
            contact: env::var("SELLER_ADMIN_CONTACT").unwrap_or(defaults.contact),
            farm_name: env::var("SELLER_ADMIN_FARM").unwrap_or(defaults.farm_name),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("SELLER_DB_PATH")
            .unwrap_or_else(|_| "./data/seller.sqlite".to_string())
            .into();

        let session_path = env::var("SELLER_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let bind_addr = env::var("SELLER_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SELLER_BIND_ADDR format");

        let log_level = env::var("SELLER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let static_dir = env::var("SELLER_STATIC_DIR")
            .unwrap_or_else(|_| "./static".to_string())
            .into();

        Self {
            db_path,
            session_path,
            bind_addr,
            log_level,
            static_dir,
            admin: AdminProfile::from_env(),
        }
    }
}
