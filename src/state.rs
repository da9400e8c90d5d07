use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::Store;
use crate::services::{CatalogClient, CatalogError};

/// Shared handler context: storage backend, catalog client and config.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub catalog: CatalogClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;
        Ok(Self {
            store,
            catalog,
            config: Arc::new(config),
        })
    }
}
