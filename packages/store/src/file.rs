//! JSON-file store
//!
//! The whole store lives in one pretty-printed JSON file. The file is read
//! once on open and rewritten after every change; a missing file is an
//! empty store. A change whose write fails is not kept in memory either.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::state::StoreState;
use crate::{ContentRecord, DefaultPage, PageRef, PageStore, StoreError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    defaults: Vec<DefaultPage>,
    state: Mutex<StoreState>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    pub async fn open(
        path: impl Into<PathBuf>,
        defaults: Vec<DefaultPage>,
    ) -> Result<Self, StoreError> {
        let path = path.into();

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "store file missing, starting empty");
                StoreState::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            defaults,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl PageStore for JsonFileStore {
    async fn list_pages(&self) -> Result<Vec<PageRef>, StoreError> {
        Ok(self.state.lock().await.pages.clone())
    }

    async fn ensure_default_pages(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut staged = state.clone();
        if staged.ensure_defaults(&self.defaults) {
            self.flush(&staged).await?;
            *state = staged;
            tracing::info!(path = %self.path.display(), "seeded default pages");
        }
        Ok(())
    }

    async fn get_content_records(&self, page_id: &str) -> Result<Vec<ContentRecord>, StoreError> {
        self.state.lock().await.records_for(page_id)
    }

    async fn upsert_content_record(
        &self,
        page_id: &str,
        section_id: &str,
        raw_text: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        // Held across the flush so concurrent upserts never write stale state.
        // Memory only changes once the file does.
        let mut state = self.state.lock().await;
        let mut staged = state.clone();
        staged.upsert(page_id, section_id, raw_text, content_type)?;
        self.flush(&staged).await?;
        *state = staged;
        Ok(())
    }
}
