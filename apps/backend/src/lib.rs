pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::catalog::CourseCatalog;
use crate::config::ServerConfig;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub catalog: Arc<CourseCatalog>,
}

/// Build the router with all routes
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Device routes
        .route("/api/device/status", get(routes::device::status))
        // Learner routes
        .route("/api/path", get(routes::progress::path))
        .route("/api/lessons/:id/start", post(routes::lessons::start))
        .route("/api/lessons/:id/check", post(routes::lessons::check))
        .route("/api/lessons/:id/complete", post(routes::lessons::complete))
        // Progress routes
        .route("/api/progress", get(routes::progress::get_progress))
        .route("/api/progress/goal", put(routes::progress::update_goal))
        .route("/api/progress/reset", post(routes::progress::reset))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::course::health_check))
        .route("/api/device/register", post(routes::device::register))
        .route("/api/course", get(routes::course::get_course))
        .route("/api/lessons/:id", get(routes::course::get_lesson))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;

    tracing::info!("Loading course from {}...", config.course_path.display());
    let catalog = CourseCatalog::load(
        &config.course_path,
        config.content_rules_path.as_deref(),
        config.exercise_seed,
    )?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        catalog: Arc::new(catalog),
    };

    let app = router(state);
    let addr = config.addr();

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
