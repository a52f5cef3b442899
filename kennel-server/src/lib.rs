pub mod config;

use std::sync::Arc;

use anyhow::Result;
use kennel_axum::KennelAxumApp;
use kennel_core::{
    DogRepository, DogsService, KennelConfigSnapshot, MemoryDogRepository, DEFAULT_PAGE_SIZE,
};
use kennel_sqlx::SqliteDogRepository;
use tracing::info;

use crate::config::MEMORY_STORE;

/// Open the configured store, failing fast when it is unreachable.
pub async fn open_store(config: &KennelConfigSnapshot) -> Result<Arc<dyn DogRepository>> {
    let url = config
        .get_string("database.url")
        .unwrap_or_else(|| MEMORY_STORE.to_string());

    if url == MEMORY_STORE {
        info!("using in-memory dog store");
        return Ok(Arc::new(MemoryDogRepository::new()));
    }

    let max_connections = config.get_u32("database.maxConnections").unwrap_or(5);
    let store = SqliteDogRepository::connect(&url, max_connections).await?;
    Ok(Arc::new(store))
}

pub async fn build(config: &KennelConfigSnapshot) -> Result<KennelAxumApp> {
    let store = open_store(config).await?;

    let page_size = config
        .get_usize("paginate.pageSize")
        .map(|n| n as u64)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let dogs = DogsService::new(store).with_page_size(page_size);
    Ok(KennelAxumApp::new(Arc::new(dogs)))
}
