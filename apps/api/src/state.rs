use std::sync::Arc;

use sqlx::PgPool;

use crate::images::ImageService;
use crate::llm_client::TextGenerator;
use crate::publish::wordpress::WpClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The text-generation gateway — an explicit constructed instance, no
    /// ambient global. Swappable for a test double.
    pub generator: Arc<dyn TextGenerator>,
    pub wp: WpClient,
    pub images: ImageService,
}
