mod config;
mod content;
mod db;
mod errors;
mod generation;
mod images;
mod llm_client;
mod models;
mod publish;
mod routes;
mod seo;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::images::ImageService;
use crate::llm_client::LlmGateway;
use crate::publish::wordpress::WpClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Postforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize text-generation gateway
    let generator = Arc::new(LlmGateway::new(config.anthropic_api_key.clone()));
    info!(
        "Text-generation gateway initialized (models: {:?})",
        llm_client::MODEL_FALLBACKS
    );

    // Initialize WordPress client
    let wp = WpClient::new(
        config.wordpress_base_url.clone(),
        config.wordpress_username.clone(),
        config.wordpress_app_password.clone(),
    );
    info!("WordPress client initialized ({})", config.wordpress_base_url);

    // Initialize image service
    let images = ImageService::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_endpoint.clone(),
        config.image_api_url.clone(),
    );
    info!("Image service initialized");

    // Build app state
    let state = AppState {
        db,
        generator,
        wp,
        images,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "postforge-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
