//! # Selection / Property Editor
//!
//! At most one block is open at a time. The open block gets a panel of
//! controls for its type; every control change is written straight to the
//! document and mirrored locally for rendering.
//!
//! ```text
//! Closed ──open(a)──▶ Open(a) ──open(b)──▶ Open(b)
//!   ▲                    │
//!   └──close / removed───┘
//! ```

use serde::Serialize;

use crate::{
    Align, Block, BlockDocument, BlockSettings, BlockType, ButtonSize, ButtonVariant, HeadingLevel,
    SettingChange,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Closed,
    Open(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum PropertyControl {
    Content { value: String, multiline: bool },
    Alignment { selected: Align },
    HeadingLevel { selected: HeadingLevel },
    FontSize { value: String },
    ButtonVariant { selected: ButtonVariant },
    ButtonSize { selected: ButtonSize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PropertyPanel {
    Editable {
        block_id: String,
        block_type: BlockType,
        controls: Vec<PropertyControl>,
    },
    /// Block type has no property template
    NoEditableProperties { block_id: String, block_type: BlockType },
}

impl PropertyPanel {
    pub fn for_block(block: &Block) -> Self {
        match controls_for(block) {
            Some(controls) => PropertyPanel::Editable {
                block_id: block.id().to_string(),
                block_type: block.block_type(),
                controls,
            },
            None => PropertyPanel::NoEditableProperties {
                block_id: block.id().to_string(),
                block_type: block.block_type(),
            },
        }
    }
}

fn controls_for(block: &Block) -> Option<Vec<PropertyControl>> {
    let content = |multiline| PropertyControl::Content {
        value: block.content().to_string(),
        multiline,
    };

    match (block.block_type(), block.settings()) {
        (BlockType::Heading, BlockSettings::Heading(s)) => Some(vec![
            content(false),
            PropertyControl::HeadingLevel { selected: s.level },
            PropertyControl::Alignment { selected: s.align },
            PropertyControl::FontSize {
                value: s.font_size.clone(),
            },
        ]),
        (BlockType::Paragraph, BlockSettings::Paragraph(s)) => Some(vec![
            content(true),
            PropertyControl::Alignment { selected: s.align },
            PropertyControl::FontSize {
                value: s.font_size.clone(),
            },
        ]),
        (BlockType::Button, BlockSettings::Button(s)) => Some(vec![
            content(false),
            PropertyControl::ButtonVariant { selected: s.variant },
            PropertyControl::ButtonSize { selected: s.size },
            PropertyControl::Alignment { selected: s.align },
        ]),
        (BlockType::Html, _) => Some(vec![content(true)]),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct PropertyEditor {
    state: SelectionState,

    /// Local copy of the open block, refreshed after every change
    mirror: Option<Block>,
}

impl PropertyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SelectionState::Open(_))
    }

    pub fn open_block_id(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Open(id) => Some(id.as_str()),
            SelectionState::Closed => None,
        }
    }

    /// Open a block, replacing any open one.
    ///
    /// An id not in the document leaves the editor as it was.
    pub fn open(&mut self, document: &BlockDocument, block_id: &str) -> bool {
        let Some(block) = document.get(block_id) else {
            tracing::warn!(block_id, "cannot open block, not in document");
            return false;
        };

        self.state = SelectionState::Open(block_id.to_string());
        self.mirror = Some(block.clone());
        true
    }

    pub fn close(&mut self) {
        self.state = SelectionState::Closed;
        self.mirror = None;
    }

    /// Forced close when the open block leaves the document
    pub fn on_block_removed(&mut self, block_id: &str) {
        if self.open_block_id() == Some(block_id) {
            tracing::debug!(block_id, "open block removed, closing editor");
            self.close();
        }
    }

    /// Panel for the open block; None when closed
    pub fn panel(&self) -> Option<PropertyPanel> {
        self.mirror.as_ref().map(PropertyPanel::for_block)
    }

    pub fn mirror(&self) -> Option<&Block> {
        self.mirror.as_ref()
    }

    pub fn edit_content(
        &mut self,
        document: &mut BlockDocument,
        content: impl Into<String>,
    ) -> bool {
        let Some(block_id) = self.open_block_id().map(str::to_string) else {
            return false;
        };

        let applied = document.update_content(&block_id, content);
        self.refresh(document);
        applied
    }

    pub fn change_setting(&mut self, document: &mut BlockDocument, change: &SettingChange) -> bool {
        let Some(block_id) = self.open_block_id().map(str::to_string) else {
            return false;
        };

        let applied = document.apply_setting(&block_id, change);
        self.refresh(document);
        applied
    }

    /// String-keyed form of `change_setting`
    pub fn set_setting(&mut self, document: &mut BlockDocument, key: &str, value: &str) -> bool {
        let Some(block_id) = self.open_block_id().map(str::to_string) else {
            return false;
        };

        let applied = document.update_setting(&block_id, key, value);
        self.refresh(document);
        applied
    }

    pub(crate) fn refresh(&mut self, document: &BlockDocument) {
        let Some(block_id) = self.open_block_id() else {
            return;
        };

        match document.get(block_id) {
            Some(block) => self.mirror = Some(block.clone()),
            None => self.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use std::sync::Arc;

    fn doc() -> BlockDocument {
        BlockDocument::with_clock("page-home", Arc::new(FixedClock::new(7)))
    }

    #[test]
    fn test_open_switch_close() {
        let mut doc = doc();
        let a = doc.insert(BlockType::Heading);
        let b = doc.insert(BlockType::Paragraph);

        let mut editor = PropertyEditor::new();
        assert_eq!(editor.state(), &SelectionState::Closed);
        assert!(editor.panel().is_none());

        assert!(editor.open(&doc, a.id()));
        assert!(editor.open(&doc, b.id()));
        assert_eq!(editor.state(), &SelectionState::Open(b.id().to_string()));

        editor.close();
        assert_eq!(editor.state(), &SelectionState::Closed);
    }

    #[test]
    fn test_open_unknown_block_keeps_state() {
        let mut doc = doc();
        let a = doc.insert(BlockType::Heading);

        let mut editor = PropertyEditor::new();
        editor.open(&doc, a.id());

        assert!(!editor.open(&doc, "heading-404"));
        assert_eq!(editor.open_block_id(), Some(a.id()));
    }

    #[test]
    fn test_removing_open_block_closes() {
        let mut doc = doc();
        let a = doc.insert(BlockType::Button);
        let b = doc.insert(BlockType::Button);

        let mut editor = PropertyEditor::new();
        editor.open(&doc, a.id());

        doc.remove(b.id());
        editor.on_block_removed(b.id());
        assert!(editor.is_open());

        doc.remove(a.id());
        editor.on_block_removed(a.id());
        assert_eq!(editor.state(), &SelectionState::Closed);
    }

    #[test]
    fn test_heading_panel_controls() {
        let mut doc = doc();
        let heading = doc.insert(BlockType::Heading);

        let mut editor = PropertyEditor::new();
        editor.open(&doc, heading.id());

        let Some(PropertyPanel::Editable { controls, .. }) = editor.panel() else {
            panic!("heading should be editable");
        };
        assert_eq!(
            controls,
            vec![
                PropertyControl::Content {
                    value: "New heading".to_string(),
                    multiline: false
                },
                PropertyControl::HeadingLevel {
                    selected: HeadingLevel::H2
                },
                PropertyControl::Alignment { selected: Align::Left },
                PropertyControl::FontSize {
                    value: "32px".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_types_without_template_get_fallback_panel() {
        let mut doc = doc();
        let mut editor = PropertyEditor::new();

        for block_type in [BlockType::Divider, BlockType::Image, BlockType::Video] {
            let block = doc.insert(block_type);
            editor.open(&doc, block.id());
            assert!(matches!(
                editor.panel(),
                Some(PropertyPanel::NoEditableProperties { .. })
            ));
        }
    }

    #[test]
    fn test_changes_write_through_and_mirror() {
        let mut doc = doc();
        let button = doc.insert(BlockType::Button);

        let mut editor = PropertyEditor::new();
        editor.open(&doc, button.id());

        assert!(editor.edit_content(&mut doc, "Sign up"));
        assert!(editor.change_setting(&mut doc, &SettingChange::Variant(ButtonVariant::Outline)));
        assert!(editor.set_setting(&mut doc, "size", "lg"));
        assert!(!editor.set_setting(&mut doc, "level", "h1"));

        let stored = doc.get(button.id()).unwrap();
        assert_eq!(stored.content(), "Sign up");
        assert_eq!(stored.settings().get("variant").as_deref(), Some("outline"));
        assert_eq!(stored.settings().get("size").as_deref(), Some("lg"));
        assert_eq!(editor.mirror(), Some(stored));
    }

    #[test]
    fn test_edits_while_closed_do_nothing() {
        let mut doc = doc();
        doc.insert(BlockType::Paragraph);
        let version = doc.version();

        let mut editor = PropertyEditor::new();
        assert!(!editor.edit_content(&mut doc, "x"));
        assert_eq!(doc.version(), version);
    }
}
