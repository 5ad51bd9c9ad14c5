//! # Editor Session
//!
//! Top-level controller for one editing session.
//!
//! The session owns the page list, the current page and its document, and
//! the drag and property-editor state. It is the only thing that talks to
//! the persistence adapter.
//!
//! ## Modes
//!
//! ```text
//! Loading → Idle ⇄ Dragging
//!           Idle ⇄ Editing
//!           Idle → Saving → Idle
//! ```
//!
//! Saves run on spawned tasks, so edits stay possible while one is in
//! flight; they simply are not part of it. Switching pages first settles
//! every outstanding save so no result is lost.

use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use blockpress_store::{PageRef, PageStore};

use crate::{
    BlockDocument, Clock, DragDropController, DragState, DropOutcome, EditorError, FailedWrite,
    Mutation, MutationResult, PersistenceAdapter, PropertyEditor, PropertyPanel, SaveReport,
    SelectionState, SettingChange, SystemClock,
};

pub const NO_PAGE_SAVE_WARNING: &str = "Select a page before saving";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Slug of the page opened on mount; falls back to the first page
    pub initial_page: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_page: Some("home".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Loading,
    Idle,
    Dragging,
    Editing,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message surfaced to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

struct PendingSave {
    page_id: String,
    version: u64,
    sections: Vec<String>,
    handle: JoinHandle<SaveReport>,
}

impl PendingSave {
    async fn resolve(self) -> SaveReport {
        match self.handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(page_id = %self.page_id, error = %e, "save task did not complete");
                SaveReport {
                    page_id: self.page_id,
                    version: self.version,
                    written: Vec::new(),
                    failed: self
                        .sections
                        .into_iter()
                        .map(|section_id| FailedWrite {
                            section_id,
                            error: format!("save task failed: {}", e),
                        })
                        .collect(),
                }
            }
        }
    }
}

pub struct EditorSession {
    adapter: PersistenceAdapter,
    options: SessionOptions,

    pages: Vec<PageRef>,
    current_page: Option<PageRef>,
    document: Option<BlockDocument>,

    drag: DragDropController,
    editor: PropertyEditor,

    loading: bool,
    /// Persistent banner text while the current page failed to load
    load_error: Option<String>,

    pending_saves: Vec<PendingSave>,
    last_save: Option<SaveReport>,
    notices: Vec<Notice>,
}

impl EditorSession {
    pub fn new(store: Arc<dyn PageStore>, options: SessionOptions) -> Self {
        Self::with_clock(store, options, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn PageStore>,
        options: SessionOptions,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            adapter: PersistenceAdapter::with_clock(store, clock),
            options,
            pages: Vec::new(),
            current_page: None,
            document: None,
            drag: DragDropController::new(),
            editor: PropertyEditor::new(),
            loading: true,
            load_error: None,
            pending_saves: Vec::new(),
            last_save: None,
            notices: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Pages
    // ------------------------------------------------------------------

    /// Seed default pages, fetch the page list and open the initial page
    pub async fn mount(&mut self) -> Result<(), EditorError> {
        self.loading = true;

        if let Err(e) = self.adapter.store().ensure_default_pages().await {
            tracing::error!(error = %e, "could not ensure default pages");
            self.notify(NoticeLevel::Warning, format!("Could not create default pages: {}", e));
        }

        self.pages = match self.adapter.store().list_pages().await {
            Ok(pages) => pages,
            Err(e) => {
                let message = format!("Could not load pages: {}", e);
                tracing::error!(error = %e, "could not list pages");
                self.notify(NoticeLevel::Error, message.clone());
                self.load_error = Some(message);
                self.loading = false;
                return Err(e.into());
            }
        };

        let initial = self
            .options
            .initial_page
            .as_deref()
            .and_then(|slug| self.pages.iter().find(|p| p.slug == slug))
            .or_else(|| self.pages.first())
            .map(|p| p.id.clone());

        match initial {
            Some(page_id) => self.select_page(&page_id).await,
            None => {
                self.loading = false;
                self.notify(NoticeLevel::Warning, "No pages available".to_string());
                Ok(())
            }
        }
    }

    /// Switch to another page, discarding the in-memory document
    pub async fn select_page(&mut self, page_id: &str) -> Result<(), EditorError> {
        let Some(page) = self.pages.iter().find(|p| p.id == page_id).cloned() else {
            self.notify(NoticeLevel::Warning, format!("Unknown page: {}", page_id));
            return Err(EditorError::UnknownPage(page_id.to_string()));
        };

        self.loading = true;
        self.settle_saves().await;

        self.drag.drag_end();
        self.editor.close();
        if let Some(previous) = self.document.take() {
            if previous.is_dirty() {
                tracing::warn!(
                    page_id = previous.page_id(),
                    version = previous.version(),
                    "discarding unsaved changes"
                );
            }
        }
        self.current_page = Some(page);

        let document = match self.adapter.load(page_id).await {
            Ok(document) => {
                self.load_error = None;
                document
            }
            Err(e) => {
                let message = format!("Could not load page: {}", e);
                tracing::error!(page_id, error = %e, "page load failed, using default blocks");
                self.notify(NoticeLevel::Error, message.clone());
                self.load_error = Some(message);
                self.adapter.default_document(page_id)
            }
        };

        self.document = Some(document);
        self.loading = false;
        Ok(())
    }

    /// Reload the current page, or remount if the page list never loaded
    pub async fn retry_load(&mut self) -> Result<(), EditorError> {
        match self.current_page.as_ref().map(|p| p.id.clone()) {
            Some(page_id) => self.select_page(&page_id).await,
            None => self.mount().await,
        }
    }

    // ------------------------------------------------------------------
    // Palette / drag and drop
    // ------------------------------------------------------------------

    pub fn drag_start(&mut self, type_id: &str) {
        self.drag.drag_start(type_id);
    }

    pub fn drag_over(&mut self) -> bool {
        self.drag.drag_over()
    }

    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }

    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    pub fn drop_on_canvas(&mut self) -> DropOutcome {
        let outcome = self.drag.drop(self.document.as_mut());
        self.surface(&outcome);
        outcome
    }

    pub fn click_palette(&mut self, type_id: &str) -> DropOutcome {
        let outcome = self.drag.click(type_id, self.document.as_mut());
        self.surface(&outcome);
        outcome
    }

    fn surface(&mut self, outcome: &DropOutcome) {
        match outcome {
            DropOutcome::Inserted { message, .. } => {
                self.notify(NoticeLevel::Info, message.clone())
            }
            DropOutcome::NoPageSelected { message } => {
                self.notify(NoticeLevel::Warning, message.clone())
            }
            DropOutcome::Ignored { reason } => self.notify(NoticeLevel::Warning, reason.clone()),
        }
    }

    // ------------------------------------------------------------------
    // Selection / properties
    // ------------------------------------------------------------------

    pub fn open_block(&mut self, block_id: &str) -> bool {
        match self.document.as_ref() {
            Some(document) => self.editor.open(document, block_id),
            None => false,
        }
    }

    pub fn close_properties(&mut self) {
        self.editor.close();
    }

    pub fn edit_content(&mut self, content: impl Into<String>) -> bool {
        match self.document.as_mut() {
            Some(document) => self.editor.edit_content(document, content),
            None => false,
        }
    }

    pub fn change_setting(&mut self, change: &SettingChange) -> bool {
        match self.document.as_mut() {
            Some(document) => self.editor.change_setting(document, change),
            None => false,
        }
    }

    pub fn set_setting(&mut self, key: &str, value: &str) -> bool {
        match self.document.as_mut() {
            Some(document) => self.editor.set_setting(document, key, value),
            None => false,
        }
    }

    pub fn panel(&self) -> Option<PropertyPanel> {
        self.editor.panel()
    }

    /// Delete a block, closing the property editor if it was open on it
    pub fn remove_block(&mut self, block_id: &str) -> bool {
        let Some(document) = self.document.as_mut() else {
            return false;
        };

        let removed = document.remove(block_id);
        if removed {
            self.editor.on_block_removed(block_id);
        }
        removed
    }

    /// Apply a scripted mutation to the current document
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let Some(document) = self.document.as_mut() else {
            return Err(EditorError::NoPageSelected);
        };

        let result = document.apply(mutation)?;
        self.editor.refresh(document);
        Ok(result)
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Snapshot the document and start writing it in the background
    pub fn begin_save(&mut self) -> Result<(), EditorError> {
        let Some(document) = self.document.as_ref() else {
            self.notify(NoticeLevel::Warning, NO_PAGE_SAVE_WARNING.to_string());
            return Err(EditorError::NoPageSelected);
        };

        let page_id = document.page_id().to_string();
        let version = document.version();
        let blocks = document.to_ordered_list().to_vec();
        let sections = blocks.iter().map(|b| b.section_id().to_string()).collect();

        tracing::debug!(page_id = %page_id, version, blocks = blocks.len(), "starting save");

        let adapter = self.adapter.clone();
        let task_page_id = page_id.clone();
        let handle =
            tokio::spawn(async move { adapter.save(&task_page_id, version, &blocks).await });

        self.pending_saves.push(PendingSave {
            page_id,
            version,
            sections,
            handle,
        });
        Ok(())
    }

    /// Wait for every in-flight save and record the results
    pub async fn settle_saves(&mut self) -> Vec<SaveReport> {
        let pending = std::mem::take(&mut self.pending_saves);
        self.resolve_all(pending).await
    }

    /// Record the saves that already finished, without waiting
    pub async fn poll_saves(&mut self) -> Vec<SaveReport> {
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_saves)
            .into_iter()
            .partition(|save| save.handle.is_finished());
        self.pending_saves = running;
        self.resolve_all(finished).await
    }

    /// Save and wait for the result
    pub async fn save(&mut self) -> Result<SaveReport, EditorError> {
        self.begin_save()?;
        self.settle_saves().await.pop().ok_or(EditorError::SaveLost)
    }

    async fn resolve_all(&mut self, saves: Vec<PendingSave>) -> Vec<SaveReport> {
        let mut reports = Vec::with_capacity(saves.len());
        for save in saves {
            let report = save.resolve().await;
            self.record_save(&report);
            reports.push(report);
        }
        reports
    }

    fn record_save(&mut self, report: &SaveReport) {
        if report.is_success() {
            if let Some(document) = self.document.as_mut() {
                if document.page_id() == report.page_id {
                    document.mark_saved(report.version);
                }
            }
            self.notify(NoticeLevel::Info, "Page saved".to_string());
        } else {
            let total = report.written.len() + report.failed.len();
            self.notify(
                NoticeLevel::Warning,
                format!(
                    "Saved {} of {} sections. Failed: {}",
                    report.written.len(),
                    total,
                    report.failed_sections().join(", ")
                ),
            );
        }
        self.last_save = Some(report.clone());
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn mode(&self) -> EditorMode {
        if self.loading {
            EditorMode::Loading
        } else if !self.pending_saves.is_empty() {
            EditorMode::Saving
        } else if self.drag.is_dragging() {
            EditorMode::Dragging
        } else if self.editor.is_open() {
            EditorMode::Editing
        } else {
            EditorMode::Idle
        }
    }

    pub fn pages(&self) -> &[PageRef] {
        &self.pages
    }

    pub fn page_by_slug(&self, slug: &str) -> Option<&PageRef> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn current_page(&self) -> Option<&PageRef> {
        self.current_page.as_ref()
    }

    pub fn document(&self) -> Option<&BlockDocument> {
        self.document.as_ref()
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn selection(&self) -> &SelectionState {
        self.editor.state()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn last_save(&self) -> Option<&SaveReport> {
        self.last_save.as_ref()
    }

    pub fn pending_save_count(&self) -> usize {
        self.pending_saves.len()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain notices once they have been shown
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }
}
