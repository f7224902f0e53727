//! Seller Console Backend
//!
//! Seller registration and login, profile editing and a per-seller product
//! catalog, served as a local REST API with SQLite persistence.

mod api;
mod config;
mod db;
mod errors;
mod identity;
mod models;
mod services;
mod session;

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use identity::SqliteIdentity;
use services::SellerConsole;
use session::{FileSlots, Session, SessionCache};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<SellerConsole>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Seller Console Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Session path: {:?}", config.session_path);
    tracing::info!("Static pages: {:?}", config.static_dir);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Administrator email: {}", config.admin.email);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let identity = Arc::new(SqliteIdentity::new(pool.clone()));
    let store = Arc::new(Repository::new(pool));

    // Session slots survive restarts
    let slots = Arc::new(FileSlots::new(&config.session_path));
    let session = Arc::new(SessionCache::new(slots));

    let console = Arc::new(SellerConsole::new(
        identity,
        store,
        session,
        config.admin.clone(),
    ));

    match console.bootstrap().await? {
        Session::Active(active) => {
            tracing::info!("Resumed session for seller {}", active.seller_id)
        }
        Session::Anonymous => tracing::info!("No persisted seller session"),
    }

    let state = AppState { console };

    // Build router
    let app = create_router(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
///
/// Paths outside `/api` and `/health` are served from `static_dir`; `/` maps
/// to its `index.html`.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Account
        .route("/auth/register", post(api::register))
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/account", delete(api::delete_account))
        .route("/dashboard", get(api::dashboard))
        // Profile
        .route(
            "/profile",
            get(api::get_profile).put(api::update_profile),
        )
        // Products
        .route(
            "/products",
            get(api::list_products)
                .post(api::create_product)
                .layer(DefaultBodyLimit::max(api::MAX_UPLOAD_BYTES)),
        )
        .route("/products/{id}", delete(api::delete_product))
        // Predictions
        .route("/predict", post(api::predict));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
