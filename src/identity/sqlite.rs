//! Identity accounts stored in SQLite with Argon2id password hashes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;

use super::{check_new_credentials, IdentityClient};
use crate::errors::AppError;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// SQLite-backed identity provider.
///
/// The signed-in user lives in memory only; [`IdentityClient::resume`]
/// restores it from the persisted session on startup.
pub struct SqliteIdentity {
    pool: SqlitePool,
    current: Mutex<Option<String>>,
}

impl SqliteIdentity {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityClient for SqliteIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AppError> {
        check_new_credentials(email, password)?;

        let exists = sqlx::query("SELECT uid FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(email_in_use());
        }

        let password_hash = hash_password(password.to_string()).await?;
        let uid = uuid::Uuid::new_v4().simple().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO accounts (uid, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&uid)
        .bind(email)
        .bind(&password_hash)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return email_in_use();
                }
            }
            AppError::from(e)
        })?;

        tracing::info!(uid = %uid, "identity account created");
        Ok(uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError> {
        let row = sqlx::query("SELECT uid, password_hash FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(AppError::Identity(INVALID_CREDENTIALS.to_string()));
        };
        let uid: String = row.get("uid");
        let stored_hash: String = row.get("password_hash");

        if !verify_password(password.to_string(), stored_hash).await? {
            return Err(AppError::Identity(INVALID_CREDENTIALS.to_string()));
        }

        *self.current.lock().await = Some(uid.clone());
        Ok(uid)
    }

    async fn sign_out(&self) {
        self.current.lock().await.take();
    }

    async fn delete_current_user(&self) -> Result<(), AppError> {
        let mut current = self.current.lock().await;
        let Some(uid) = current.clone() else {
            return Err(AppError::Identity("No user is currently signed in.".to_string()));
        };

        sqlx::query("DELETE FROM accounts WHERE uid = ?")
            .bind(&uid)
            .execute(&self.pool)
            .await?;

        *current = None;
        tracing::info!(uid = %uid, "identity account deleted");
        Ok(())
    }

    async fn resume(&self, user_id: &str) {
        *self.current.lock().await = Some(user_id.to_string());
    }

    async fn current_user(&self) -> Option<String> {
        self.current.lock().await.clone()
    }
}

fn email_in_use() -> AppError {
    AppError::Identity("The email address is already in use by another account.".to_string())
}

/// Hash on the blocking pool.
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    })
    .await?
}

async fn verify_password(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        let parsed = PasswordHash::new(&stored_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash format: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    })
    .await?
}
