use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable blob store for uploaded avatar files. Default: S3-compatible
    /// object storage, injected at startup.
    pub files: Arc<dyn FileStore>,
    pub config: Config,
}
