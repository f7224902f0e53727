//! SQLite-backed document store.
//!
//! Uses prepared statements; each call touches a single document.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::DocumentStore;
use crate::errors::AppError;
use crate::models::{NewProduct, Prediction, Product, Role, SellerProfile};

/// Database repository for seller and product documents.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for Repository {
    // ==================== SELLER OPERATIONS ====================

    async fn get_seller(&self, id: &str) -> Result<Option<SellerProfile>, AppError> {
        let row = sqlx::query(
            "SELECT name, email, address, contact, farm_name, role FROM sellers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(seller_from_row))
    }

    async fn set_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT OR REPLACE INTO sellers (id, name, email, address, contact, farm_name, role, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.address)
        .bind(&profile.contact)
        .bind(&profile.farm_name)
        .bind(profile.role.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_seller(&self, id: &str, profile: &SellerProfile) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "UPDATE sellers SET name = ?, email = ?, address = ?, contact = ?, farm_name = ?, role = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.address)
        .bind(&profile.contact)
        .bind(&profile.farm_name)
        .bind(profile.role.as_str())
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Seller {} not found", id)));
        }

        Ok(())
    }

    async fn delete_seller(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(seller_id = id, "seller document already absent");
        }

        Ok(())
    }

    // ==================== PRODUCT OPERATIONS ====================

    async fn list_products(&self, seller_id: &str) -> Result<Vec<Product>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, price, quantity, description, image FROM products WHERE seller_id = ? ORDER BY created_at, rowid"
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(product_from_row).collect())
    }

    async fn add_product(
        &self,
        seller_id: &str,
        product: &NewProduct,
    ) -> Result<Product, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO products (seller_id, id, name, price, quantity, description, image, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(seller_id)
        .bind(&id)
        .bind(&product.name)
        .bind(&product.price)
        .bind(&product.quantity)
        .bind(&product.description)
        .bind(&product.image)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: product.name.clone(),
            price: product.price.clone(),
            quantity: product.quantity.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
        })
    }

    async fn delete_product(&self, seller_id: &str, product_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE seller_id = ? AND id = ?")
            .bind(seller_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        Ok(())
    }

    // ==================== PREDICTION OPERATIONS ====================

    async fn add_prediction(&self, prediction: &Prediction) -> Result<String, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO predictions (id, class_name, lifespan, definition, location, confidence, is_valid, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&prediction.class_name)
        .bind(&prediction.lifespan)
        .bind(&prediction.definition)
        .bind(&prediction.location)
        .bind(prediction.confidence)
        .bind(prediction.is_valid)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }
}

// ==================== ROW MAPPERS ====================

fn seller_from_row(row: &SqliteRow) -> SellerProfile {
    let role: String = row.get("role");
    SellerProfile {
        name: row.get("name"),
        email: row.get("email"),
        address: row.get("address"),
        contact: row.get("contact"),
        farm_name: row.get("farm_name"),
        role: Role::parse(&role).unwrap_or_default(),
    }
}

fn product_from_row(row: &SqliteRow) -> Product {
    Product {
        id: row.get("id"),
        name: row.get("name"),
        price: row.get("price"),
        quantity: row.get("quantity"),
        description: row.get("description"),
        image: row.get("image"),
    }
}
