use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::proxy::SubmissionProxy;
use crate::core::resolver::BusinessResolver;
use crate::core::signage::{FileSelectionStore, NoopSelectionStore};
use crate::core::{Row, RowSource, SelectionStore};
use crate::utils::error::Result;
use crate::web::cache::PageCache;

pub type SharedRowSource = Arc<dyn RowSource>;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<BusinessResolver<SharedRowSource>>,
    pub proxy: SubmissionProxy,
    pub cache: Arc<PageCache>,
    pub selections: Arc<dyn SelectionStore>,
}

impl AppState {
    pub fn new(source: SharedRowSource, server: &ServerConfig) -> Self {
        let selections: Arc<dyn SelectionStore> = match &server.selection_dir {
            Some(dir) => Arc::new(FileSelectionStore::new(dir.clone())),
            None => Arc::new(NoopSelectionStore),
        };

        Self {
            resolver: Arc::new(BusinessResolver::new(source)),
            proxy: SubmissionProxy::new(),
            cache: Arc::new(PageCache::new(server.revalidate_after())),
            selections,
        }
    }

    /// Cached lookup first, then a fresh sheet read. Only successful
    /// lookups are remembered.
    pub async fn resolve_page(&self, slug: &str) -> Result<Option<Row>> {
        if let Some(hit) = self.cache.get(slug).await {
            tracing::debug!(slug, "page cache hit");
            return Ok(hit);
        }

        let found = self.resolver.resolve_by_slug(slug).await?;
        self.cache.insert(slug, found.clone()).await;
        Ok(found)
    }

    /// Ahead-of-time generation: one sheet read seeds every known page.
    pub async fn prerender(&self) -> usize {
        if !self.cache.is_enabled() {
            return 0;
        }

        match self.resolver.fetch_all().await {
            Ok(rows) => {
                let warmed = self.cache.warm(rows).await;
                tracing::info!(pages = warmed, "prerendered known slugs");
                warmed
            }
            Err(e) => {
                tracing::warn!(error = %e, "prerender skipped, pages will resolve on demand");
                0
            }
        }
    }

    pub fn cache_control(&self) -> String {
        let secs = self.cache.revalidate_after().as_secs();
        if secs == 0 {
            "no-store".to_string()
        } else {
            format!("s-maxage={}, stale-while-revalidate", secs)
        }
    }
}
