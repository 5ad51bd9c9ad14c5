//! Backend-independent store contents
//!
//! Both stores keep a `StoreState`; the file store additionally
//! serializes it to disk after every change.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{ContentRecord, DefaultPage, PageRef, StoreError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    pub pages: Vec<PageRef>,

    /// Records per page id, in first-write order
    #[serde(default)]
    pub records: HashMap<String, Vec<ContentRecord>>,
}

impl StoreState {
    /// Add every default page whose slug is not present yet.
    ///
    /// Returns true if anything was added.
    pub fn ensure_defaults(&mut self, defaults: &[DefaultPage]) -> bool {
        let mut changed = false;

        for default in defaults {
            if self.pages.iter().any(|p| p.slug == default.slug) {
                continue;
            }
            self.pages.push(default.to_page_ref());
            changed = true;
        }

        changed
    }

    pub fn records_for(&self, page_id: &str) -> Result<Vec<ContentRecord>, StoreError> {
        if !self.has_page(page_id) {
            return Err(StoreError::PageNotFound(page_id.to_string()));
        }

        Ok(self.records.get(page_id).cloned().unwrap_or_default())
    }

    pub fn upsert(
        &mut self,
        page_id: &str,
        section_id: &str,
        raw_text: &str,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if !self.has_page(page_id) {
            return Err(StoreError::PageNotFound(page_id.to_string()));
        }

        let records = self.records.entry(page_id.to_string()).or_default();

        match records.iter_mut().find(|r| r.section_id == section_id) {
            Some(existing) => {
                existing.raw_text = raw_text.to_string();
                existing.content_type = content_type.to_string();
            }
            None => records.push(ContentRecord {
                section_id: section_id.to_string(),
                content_type: content_type.to_string(),
                raw_text: raw_text.to_string(),
            }),
        }

        Ok(())
    }

    fn has_page(&self, page_id: &str) -> bool {
        self.pages.iter().any(|p| p.id == page_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_defaults_skips_existing_slugs() {
        let mut state = StoreState::default();
        let defaults = DefaultPage::standard_set();

        assert!(state.ensure_defaults(&defaults));
        assert!(!state.ensure_defaults(&defaults));
        assert_eq!(state.pages.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut state = StoreState::default();
        state.ensure_defaults(&DefaultPage::standard_set());

        state.upsert("page-home", "a", "one", "text").unwrap();
        state.upsert("page-home", "b", "two", "text").unwrap();
        state.upsert("page-home", "a", "<p>three</p>", "html").unwrap();

        let records = state.records_for("page-home").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].section_id, "a");
        assert_eq!(records[0].raw_text, "<p>three</p>");
        assert_eq!(records[0].content_type, "html");
        assert_eq!(records[1].section_id, "b");
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        let mut state = StoreState::default();

        assert!(matches!(
            state.upsert("page-missing", "a", "x", "text"),
            Err(StoreError::PageNotFound(_))
        ));
        assert!(state.records_for("page-missing").is_err());
    }
}
