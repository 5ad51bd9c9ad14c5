//! # Blockpress Editor
//!
//! Core block editing engine for Blockpress pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ catalog: block types, palette, defaults     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Ordered blocks with typed settings       │
//! │  - Drag/drop and click-to-add insertion     │
//! │  - Property editing of the open block       │
//! │  - Session modes and background saves       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: pages + content records              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: the property panel is a mirror
//! 2. **One record per block**: section id is the block id
//! 3. **Saves never block edits**: they run on a snapshot
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockpress_editor::{EditorSession, SessionOptions};
//! use blockpress_store::MemoryStore;
//!
//! let mut session = EditorSession::new(Arc::new(MemoryStore::new()), SessionOptions::default());
//! session.mount().await?;
//!
//! // Add a heading from the palette and edit it
//! session.drag_start("heading");
//! session.drag_over();
//! session.drop_on_canvas();
//!
//! let report = session.save().await?;
//! assert!(report.is_success());
//! ```

mod block;
mod catalog;
mod document;
mod drag_drop;
mod errors;
mod id_generator;
mod mutations;
mod persistence;
mod property_editor;
mod session;
mod settings;

pub use block::{Block, BlockType, UnknownBlockType};
pub use catalog::{BlockDescriptor, Catalog, PaletteCategory, PaletteEntry, UnknownCategory};
pub use document::BlockDocument;
pub use drag_drop::{DragDropController, DragState, DropOutcome, NO_PAGE_WARNING};
pub use errors::EditorError;
pub use id_generator::{Clock, FixedClock, IdGenerator, SystemClock};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use persistence::{
    classify, content_type_for, FailedWrite, PersistenceAdapter, PersistenceError, SaveReport,
    StoredPayload, CONTENT_TYPE_HTML, CONTENT_TYPE_TEXT, DEFAULT_HEADING_ID, DEFAULT_HEADING_TEXT,
    DEFAULT_PARAGRAPH_ID, DEFAULT_PARAGRAPH_TEXT,
};
pub use property_editor::{PropertyControl, PropertyEditor, PropertyPanel, SelectionState};
pub use session::{
    EditorMode, EditorSession, Notice, NoticeLevel, SessionOptions, NO_PAGE_SAVE_WARNING,
};
pub use settings::{
    Align, BlockSettings, ButtonSettings, ButtonSize, ButtonVariant, HeadingLevel, HeadingSettings,
    ParagraphSettings, SettingChange, SettingError, UnknownVariant,
};

// Re-export store types for convenience
pub use blockpress_store::{PageRef, PageStatus, PageStore};
