use async_trait::async_trait;

use crate::{ContentRecord, PageRef, StoreError};

/// Backend capabilities the editor consumes.
///
/// Implementations must be shareable across tasks: saves run on spawned
/// tasks and issue their record writes concurrently.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// All known pages, in creation order
    async fn list_pages(&self) -> Result<Vec<PageRef>, StoreError>;

    /// Create any missing default pages.
    ///
    /// Must be idempotent: a second call never adds or alters pages.
    async fn ensure_default_pages(&self) -> Result<(), StoreError>;

    /// Content records for a page, in the order they were first written
    async fn get_content_records(&self, page_id: &str) -> Result<Vec<ContentRecord>, StoreError>;

    /// Insert or replace the record keyed by `(page_id, section_id)`
    async fn upsert_content_record(
        &self,
        page_id: &str,
        section_id: &str,
        raw_text: &str,
        content_type: &str,
    ) -> Result<(), StoreError>;
}
