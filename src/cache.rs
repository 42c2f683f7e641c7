//! In-memory caching using moka
//!
//! Provides application-level caching for trek templates. Templates change
//! rarely (a seasonal price revision at most), so generous TTLs are used.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::queries;
use crate::models::{TemplateSummary, TrekTemplate};

/// Application cache holding trek templates and the template listing
#[derive(Clone)]
pub struct AppCache {
    /// Trek templates (id -> TrekTemplate)
    pub templates: Cache<Uuid, Arc<TrekTemplate>>,
    /// Template listing for the picker (singleton)
    pub template_list: Cache<String, Arc<Vec<TemplateSummary>>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Templates: 200 entries, 1 hour TTL, 30 min idle
            templates: Cache::builder()
                .max_capacity(200)
                .time_to_live(Duration::from_secs(60 * 60))
                .time_to_idle(Duration::from_secs(30 * 60))
                .build(),

            // Template listing: 1 entry, 30 min TTL
            template_list: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            templates_size: self.templates.entry_count(),
            listing_cached: self.template_list.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.templates.invalidate_all();
        self.template_list.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub templates_size: u64,
    pub listing_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 15 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(15 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    match queries::list_templates(db).await {
        Ok(summaries) => {
            cache
                .template_list
                .insert("all".to_string(), Arc::new(summaries))
                .await;
        }
        Err(e) => warn!("Failed to warm template listing cache: {}", e),
    }

    match queries::get_active_templates(db).await {
        Ok(templates) => {
            for template in templates {
                cache
                    .templates
                    .insert(template.id, Arc::new(template))
                    .await;
            }
        }
        Err(e) => warn!("Failed to warm template cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}
