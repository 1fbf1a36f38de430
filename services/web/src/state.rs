//! Application state shared across handlers

use std::sync::Arc;

use omdb::MetadataProvider;
use sqlx::SqlitePool;
use tera::Tera;

use crate::repositories::DataManager;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub data_manager: Arc<dyn DataManager>,
    pub metadata: Arc<dyn MetadataProvider>,
    pub templates: Arc<Tera>,
}
