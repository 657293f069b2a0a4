use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use db::PgStore;
use services::dashboard::DashboardComposer;
use services::mind_client::MindClient;
use services::mood::MoodAggregator;
use services::recommendations::RecommendationCacheManager;
use services::store::ActivityStore;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub activity: Arc<dyn ActivityStore>,
    pub dashboard: Arc<DashboardComposer>,
}

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let protected_routes = Router::new()
        // Dashboard & progress
        .route("/api/dashboard/overview", get(handlers::dashboard::get_overview))
        .route("/api/dashboard/resources", get(handlers::dashboard::get_resources))
        .route("/api/progress", get(handlers::progress::get_progress))
        // Check-ins
        .route(
            "/api/check-ins",
            get(handlers::check_ins::list_check_ins).post(handlers::check_ins::create_check_in),
        )
        .route(
            "/api/check-ins/:id",
            get(handlers::check_ins::get_check_in)
                .put(handlers::check_ins::update_check_in)
                .delete(handlers::check_ins::delete_check_in),
        )
        // Journal
        .route(
            "/api/journal",
            get(handlers::journal::list_entries).post(handlers::journal::create_entry),
        )
        .route(
            "/api/journal/:id",
            put(handlers::journal::update_entry)
                .delete(handlers::journal::delete_entry),
        )
        // Chat
        .route(
            "/api/chat/messages",
            get(handlers::chat::list_messages).delete(handlers::chat::clear_history),
        )
        .route("/api/chat/messages/user", post(handlers::chat::post_user_message))
        .route(
            "/api/chat/messages/assistant",
            post(handlers::chat::post_assistant_message),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors_layer(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = config.frontend_url.parse().into_iter().collect();
    // Extra comma-separated origins, e.g. for LAN testing from another device
    if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
        origins.extend(extra.split(',').filter_map(|o| o.trim().parse().ok()));
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-auth-token"),
        ])
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindwell_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    let store = Arc::new(PgStore::new(db.clone()));
    let mind = Arc::new(MindClient::new(
        &config.mind_backend_url,
        config.mind_backend_timeout(),
    )?);
    let recommendations = RecommendationCacheManager::new(
        store.clone(),
        mind,
        config.recommendation_cache_ttl(),
    );
    let dashboard = DashboardComposer::new(store.clone(), MoodAggregator::default(), recommendations);

    let state = AppState {
        db,
        config: config.clone(),
        activity: store,
        dashboard: Arc::new(dashboard),
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!(
        %addr,
        mind_backend = %config.mind_backend_url,
        cache_ttl_ms = config.recommendation_cache_ttl_ms,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
