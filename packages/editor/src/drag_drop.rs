//! # Drag/Drop Controller
//!
//! Turns palette gestures into block inserts.
//!
//! Dragging is visual only: a drop anywhere on the canvas appends to the
//! end of the document, exactly like clicking the palette entry.

use crate::{BlockDocument, BlockType, Catalog};

/// Transient drag state, for visual feedback
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    pub is_dragging: bool,
    pub dragged_type_id: Option<String>,

    /// Pointer is over the canvas drop zone
    pub over_canvas: bool,
}

/// What a drop or palette click did
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A block was appended; `message` is the confirmation to show
    Inserted {
        block_id: String,
        block_type: BlockType,
        message: String,
    },

    /// No page is selected, nothing was inserted
    NoPageSelected { message: String },

    /// Unknown or listing-only palette id, or a drop with no drag
    Ignored { reason: String },
}

pub const NO_PAGE_WARNING: &str = "Select a page before adding blocks";

#[derive(Debug, Default)]
pub struct DragDropController {
    state: DragState,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging
    }

    pub fn drag_start(&mut self, type_id: &str) {
        tracing::debug!(type_id, "drag start");
        self.state = DragState {
            is_dragging: true,
            dragged_type_id: Some(type_id.to_string()),
            over_canvas: false,
        };
    }

    /// Pointer entered or moved over the canvas; returns whether to
    /// highlight the drop zone
    pub fn drag_over(&mut self) -> bool {
        self.state.over_canvas = self.state.is_dragging;
        self.state.over_canvas
    }

    pub fn drag_leave(&mut self) {
        self.state.over_canvas = false;
    }

    /// Drag finished without a drop (or after one)
    pub fn drag_end(&mut self) {
        self.state = DragState::default();
    }

    /// Drop on the canvas.
    ///
    /// `document` is None when no page is selected.
    pub fn drop(&mut self, document: Option<&mut BlockDocument>) -> DropOutcome {
        let dragged = self.state.dragged_type_id.take();
        self.drag_end();

        match dragged {
            Some(type_id) => Self::insert(&type_id, document),
            None => {
                tracing::debug!("drop without an active drag");
                DropOutcome::Ignored {
                    reason: "Nothing is being dragged".to_string(),
                }
            }
        }
    }

    /// Palette click: same effect as a drag and drop
    pub fn click(&mut self, type_id: &str, document: Option<&mut BlockDocument>) -> DropOutcome {
        Self::insert(type_id, document)
    }

    fn insert(type_id: &str, document: Option<&mut BlockDocument>) -> DropOutcome {
        let Some(document) = document else {
            tracing::warn!(type_id, "insert rejected, no page selected");
            return DropOutcome::NoPageSelected {
                message: NO_PAGE_WARNING.to_string(),
            };
        };

        let Some(entry) = Catalog::palette_entry(type_id) else {
            tracing::warn!(type_id, "insert ignored, unknown palette entry");
            return DropOutcome::Ignored {
                reason: format!("Unknown block type: {}", type_id),
            };
        };

        let Some(block_type) = entry.block_type else {
            tracing::warn!(type_id, "insert ignored, palette entry is a grouping");
            return DropOutcome::Ignored {
                reason: format!("{} cannot be inserted yet", entry.label),
            };
        };

        let block = document.insert(block_type);
        DropOutcome::Inserted {
            block_id: block.id().to_string(),
            block_type,
            message: format!("{} added", Catalog::describe(block_type).display_name),
        }
    }
}
