use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;

use crate::schemas::AppState;

/// Initialize application configuration and state
pub fn initialize_app_state(data_dir: &Path) -> Result<AppState> {
    // Load the dataset into memory once; everything downstream reads from it
    tracing::info!("Loading dataset from: {}", data_dir.display());
    let dataset = model::Dataset::load(data_dir)?;
    tracing::info!("Loaded {}", dataset.summary());

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        dataset: Arc::new(dataset),
        cache,
    })
}
