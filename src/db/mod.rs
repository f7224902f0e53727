//! Database module for SQLite persistence.
//!
//! One SQLite file holds identity accounts, seller documents and their product
//! sub-collections.

mod repository;

pub use repository::*;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::{NewProduct, Prediction, Product, SellerProfile};

/// Keyed seller documents, each owning a keyed collection of products.
///
/// Every operation is atomic at document granularity. Nothing spans
/// documents; callers sequence multi-document effects themselves.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read `sellers/{id}`.
    async fn get_seller(&self, id: &str) -> Result<Option<SellerProfile>, AppError>;

    /// Create or replace `sellers/{id}`.
    async fn set_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError>;

    /// Update an existing `sellers/{id}`. Fails with `NotFound` if absent.
    async fn update_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError>;

    /// Remove `sellers/{id}`. Removing a missing document succeeds.
    async fn delete_seller(&self, id: &str) -> Result<(), AppError>;

    /// All of `sellers/{seller_id}/products`, in store order.
    async fn list_products(&self, seller_id: &str) -> Result<Vec<Product>, AppError>;

    /// Add a product with a store-generated id.
    async fn add_product(&self, seller_id: &str, product: &NewProduct)
        -> Result<Product, AppError>;

    /// Remove one product. Fails with `NotFound` if absent.
    async fn delete_product(&self, seller_id: &str, product_id: &str) -> Result<(), AppError>;

    /// Append a prediction record and return its id.
    async fn add_prediction(&self, prediction: &Prediction) -> Result<String, AppError>;
}

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            uid TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sellers (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            contact TEXT NOT NULL,
            farm_name TEXT NOT NULL,
            role TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No foreign key on seller_id: product sub-collections are removed by the
    // account deletion cascade, not by the database.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            seller_id TEXT NOT NULL,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            price TEXT NOT NULL,
            quantity TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            image TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            PRIMARY KEY (seller_id, id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_products_seller ON products(seller_id, created_at);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS predictions (
            id TEXT PRIMARY KEY,
            class_name TEXT NOT NULL,
            lifespan TEXT NOT NULL,
            definition TEXT NOT NULL,
            location TEXT NOT NULL,
            confidence REAL NOT NULL,
            is_valid INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
