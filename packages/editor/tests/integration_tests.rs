//! Integration tests for editor crate

use blockpress_editor::{
    Align, BlockDocument, BlockSettings, BlockType, Catalog, FixedClock, HeadingLevel, Mutation,
    MutationError, PaletteCategory, SettingChange,
};
use std::sync::Arc;

fn document() -> BlockDocument {
    BlockDocument::with_clock("page-home", Arc::new(FixedClock::new(1_700_000_000_000)))
}

#[test]
fn test_document_lifecycle() {
    let mut doc = document();

    assert_eq!(doc.version(), 0);
    assert!(!doc.is_dirty());
    assert!(doc.is_empty());

    let heading = doc.insert(BlockType::Heading);
    assert_eq!(heading.id(), "heading-1700000000000");
    assert_eq!(heading.content(), "New heading");
    assert_eq!(heading.settings(), &Catalog::default_settings(BlockType::Heading));
    assert!(doc.is_dirty());

    assert!(doc.update_content(heading.id(), "Launch day"));
    assert!(doc.update_setting(heading.id(), "level", "h1"));
    assert!(doc.update_setting(heading.id(), "align", "center"));

    let stored = doc.get(heading.id()).unwrap();
    assert_eq!(stored.content(), "Launch day");
    match stored.settings() {
        BlockSettings::Heading(s) => {
            assert_eq!(s.level, HeadingLevel::H1);
            assert_eq!(s.align, Align::Center);
            assert_eq!(s.font_size, "32px");
        }
        other => panic!("expected heading settings, got {:?}", other),
    }

    let version = doc.version();
    doc.mark_saved(version);
    assert!(!doc.is_dirty());

    assert!(doc.remove(heading.id()));
    assert!(doc.is_empty());
    assert!(doc.is_dirty());
}

#[test]
fn test_insert_order_is_append_order() {
    let mut doc = document();
    for block_type in [BlockType::Paragraph, BlockType::Button, BlockType::Divider] {
        doc.insert(block_type);
    }

    let types: Vec<BlockType> = doc.to_ordered_list().iter().map(|b| b.block_type()).collect();
    assert_eq!(types, vec![BlockType::Paragraph, BlockType::Button, BlockType::Divider]);

    let ids: Vec<&str> = doc.to_ordered_list().iter().map(|b| b.id()).collect();
    assert_eq!(
        ids,
        vec![
            "paragraph-1700000000000",
            "button-1700000000000",
            "divider-1700000000000"
        ]
    );
}

#[test]
fn test_scripted_mutations() {
    let mut doc = document();

    let script: Vec<Mutation> = serde_json::from_str(
        r#"[
            {"type": "insertBlock", "blockType": "button"}
        ]"#,
    )
    .unwrap();

    let mut inserted = None;
    for mutation in script {
        inserted = Some(doc.apply(mutation).unwrap().block_id);
    }
    let button_id = inserted.unwrap();

    let change = SettingChange::parse("variant", "outline").unwrap();
    let result = doc
        .apply(Mutation::update_setting(&button_id, &change))
        .unwrap();
    assert_eq!(result.version, 2);
    assert_eq!(result.block_id, button_id);
    assert_eq!(doc.get(&button_id).unwrap().settings().get("variant").as_deref(), Some("outline"));
}

#[test]
fn test_invalid_mutations_leave_document_unchanged() {
    let mut doc = document();
    let paragraph = doc.insert(BlockType::Paragraph);
    let version = doc.version();

    let err = doc
        .apply(Mutation::InsertBlock {
            block_type: "carousel".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::UnknownBlockType("carousel".to_string()));

    let err = doc
        .apply(Mutation::UpdateContent {
            block_id: "missing".to_string(),
            content: "x".to_string(),
        })
        .unwrap_err();
    assert_eq!(err, MutationError::BlockNotFound("missing".to_string()));

    // paragraphs have no heading level
    assert!(!doc.update_setting(paragraph.id(), "level", "h1"));

    assert_eq!(doc.version(), version);
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get(paragraph.id()).unwrap().settings(), paragraph.settings());
}

#[test]
fn test_catalog_covers_every_element() {
    let elements = Catalog::list_types(PaletteCategory::Elements);
    assert_eq!(elements.len(), BlockType::ALL.len());
    assert!(elements.iter().all(|entry| entry.is_insertable()));

    let templates = Catalog::list_types(PaletteCategory::Templates);
    assert!(!templates.is_empty());
    assert!(templates.iter().all(|entry| !entry.is_insertable()));

    // unknown ids still describe as something renderable
    let fallback = Catalog::describe_id("carousel");
    assert_eq!(fallback.block_type, None);
}
