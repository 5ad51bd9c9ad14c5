//! In-process store
//!
//! Nothing outlives the process. Used by tests and by sessions that
//! only need a scratch backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::state::StoreState;
use crate::{ContentRecord, DefaultPage, PageRef, PageStore, StoreError};

#[derive(Debug)]
pub struct MemoryStore {
    defaults: Vec<DefaultPage>,
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Empty store seeded (on `ensure_default_pages`) with the standard pages
    pub fn new() -> Self {
        Self::with_defaults(DefaultPage::standard_set())
    }

    pub fn with_defaults(defaults: Vec<DefaultPage>) -> Self {
        Self {
            defaults,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Number of records currently stored for a page (0 for unknown pages)
    pub async fn record_count(&self, page_id: &str) -> usize {
        self.state
            .read()
            .await
            .records
            .get(page_id)
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn list_pages(&self) -> Result<Vec<PageRef>, StoreError> {
        Ok(self.state.read().await.pages.clone())
    }

    async fn ensure_default_pages(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.ensure_defaults(&self.defaults) {
            tracing::debug!(pages = state.pages.len(), "seeded default pages");
        }
        Ok(())
    }

    async fn get_content_records(&self, page_id: &str) -> Result<Vec<ContentRecord>, StoreError> {
        self.state.read().await.records_for(page_id)
    }

    async fn upsert_content_record(
        &self,
        page_id: &str,
        section_id: &str,
        raw_text: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.state
            .write()
            .await
            .upsert(page_id, section_id, raw_text, content_type)
    }
}
