//! # Persistence Adapter
//!
//! Maps a `BlockDocument` to and from the store's content records.
//!
//! ## Record format
//!
//! One record per block, keyed by `(page_id, section_id)`. The record body
//! is a [`StoredPayload`]:
//!
//! ```text
//! heading / button / image  →  {"content": "...", "settings": {...}}
//! everything else           →  content, verbatim
//! ```
//!
//! Plain text keeps records written before settings existed readable.

use futures::future::join_all;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

use blockpress_store::{ContentRecord, PageStore, StoreError};

use crate::{Block, BlockDocument, BlockSettings, BlockType, Clock, SystemClock};

pub const CONTENT_TYPE_TEXT: &str = "text";
pub const CONTENT_TYPE_HTML: &str = "html";

pub const DEFAULT_HEADING_ID: &str = "default-heading";
pub const DEFAULT_HEADING_TEXT: &str = "Welcome to your page";
pub const DEFAULT_PARAGRAPH_ID: &str = "default-paragraph";
pub const DEFAULT_PARAGRAPH_TEXT: &str = concat!(
    "Start building your page by dragging blocks from the palette ",
    "or clicking an existing block to edit it."
);

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Failed to load page {page_id}: {source}")]
    Load {
        page_id: String,
        #[source]
        source: StoreError,
    },
}

/// Infer a block type from a stored record's metadata.
///
/// Total: anything unrecognised is a paragraph.
pub fn classify(section_id: &str, content_type: &str) -> BlockType {
    if content_type == CONTENT_TYPE_HTML {
        BlockType::Html
    } else if section_id.contains("heading") {
        BlockType::Heading
    } else if section_id.contains("button") {
        BlockType::Button
    } else {
        BlockType::Paragraph
    }
}

/// Content type written for a block
pub fn content_type_for(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Html => CONTENT_TYPE_HTML,
        _ => CONTENT_TYPE_TEXT,
    }
}

/// Body of one content record
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPayload {
    PlainText(String),
    Structured { content: String, settings: Value },
}

impl StoredPayload {
    /// Payload a block is saved as
    pub fn for_block(block: &Block) -> Self {
        match block.block_type() {
            BlockType::Heading | BlockType::Button | BlockType::Image => StoredPayload::Structured {
                content: block.content().to_string(),
                settings: block.settings().to_json(),
            },
            _ => StoredPayload::PlainText(block.content().to_string()),
        }
    }

    /// Decode a record body.
    ///
    /// Only a JSON object with a string `content` field is structured;
    /// everything else is taken verbatim.
    pub fn decode(raw_text: &str) -> Self {
        let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(raw_text) else {
            return StoredPayload::PlainText(raw_text.to_string());
        };

        match object.remove("content") {
            Some(Value::String(content)) => StoredPayload::Structured {
                content,
                settings: object.remove("settings").unwrap_or(Value::Null),
            },
            _ => StoredPayload::PlainText(raw_text.to_string()),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            StoredPayload::PlainText(content) => content.clone(),
            StoredPayload::Structured { content, settings } => {
                json!({ "content": content, "settings": settings }).to_string()
            }
        }
    }

    /// Rebuild a block of `block_type` from this payload
    fn into_block(self, section_id: &str, block_type: BlockType) -> Block {
        let (content, settings) = match self {
            StoredPayload::PlainText(content) => (content, BlockSettings::default_for(block_type)),
            StoredPayload::Structured { content, settings } if settings.is_object() => {
                (content, BlockSettings::from_json(block_type, &settings))
            }
            StoredPayload::Structured { content, .. } => {
                (content, BlockSettings::default_for(block_type))
            }
        };

        Block::restored(
            section_id.to_string(),
            section_id.to_string(),
            block_type,
            content,
            settings,
        )
    }
}

/// One record write that did not go through
#[derive(Debug, Clone, PartialEq)]
pub struct FailedWrite {
    pub section_id: String,
    pub error: String,
}

/// Outcome of a save: success only when every record was written
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    pub page_id: String,

    /// Document version the save was taken from
    pub version: u64,

    pub written: Vec<String>,
    pub failed: Vec<FailedWrite>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_sections(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.section_id.as_str()).collect()
    }
}

#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn PageStore>,
    clock: Arc<dyn Clock>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Adapter whose documents draw block ids from `clock`
    pub fn with_clock(store: Arc<dyn PageStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn PageStore> {
        &self.store
    }

    /// Load a page's records into a document.
    ///
    /// A page with no records gets the two-block default document.
    pub async fn load(&self, page_id: &str) -> Result<BlockDocument, PersistenceError> {
        let records = self
            .store
            .get_content_records(page_id)
            .await
            .map_err(|source| PersistenceError::Load {
                page_id: page_id.to_string(),
                source,
            })?;

        if records.is_empty() {
            tracing::info!(page_id, "page has no content, using default blocks");
            return Ok(self.default_document(page_id));
        }

        let blocks: Vec<Block> = records.iter().map(record_to_block).collect();
        tracing::info!(page_id, blocks = blocks.len(), "loaded page");

        Ok(BlockDocument::from_blocks(page_id, blocks, self.clock.clone()))
    }

    /// The document shown for a page with nothing stored yet
    pub fn default_document(&self, page_id: &str) -> BlockDocument {
        let blocks = vec![
            Block::fresh(
                DEFAULT_HEADING_ID.to_string(),
                BlockType::Heading,
                DEFAULT_HEADING_TEXT.to_string(),
                BlockSettings::default_for(BlockType::Heading),
            ),
            Block::fresh(
                DEFAULT_PARAGRAPH_ID.to_string(),
                BlockType::Paragraph,
                DEFAULT_PARAGRAPH_TEXT.to_string(),
                BlockSettings::default_for(BlockType::Paragraph),
            ),
        ];

        BlockDocument::from_blocks(page_id, blocks, self.clock.clone())
    }

    /// Write one record per block.
    ///
    /// Writes are independent: a failed record never stops the others.
    pub async fn save(&self, page_id: &str, version: u64, blocks: &[Block]) -> SaveReport {
        let writes = blocks.iter().map(|block| {
            let raw_text = StoredPayload::for_block(block).encode();
            let content_type = content_type_for(block.block_type());
            let section_id = block.section_id().to_string();

            async move {
                let result = self
                    .store
                    .upsert_content_record(page_id, &section_id, &raw_text, content_type)
                    .await;
                (section_id, result)
            }
        });

        let mut report = SaveReport {
            page_id: page_id.to_string(),
            version,
            written: Vec::new(),
            failed: Vec::new(),
        };

        for (section_id, result) in join_all(writes).await {
            match result {
                Ok(()) => report.written.push(section_id),
                Err(e) => {
                    tracing::error!(
                        page_id,
                        section_id = %section_id,
                        error = %e,
                        "record write failed"
                    );
                    report.failed.push(FailedWrite {
                        section_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            page_id,
            written = report.written.len(),
            failed = report.failed.len(),
            "saved page"
        );

        report
    }
}

fn record_to_block(record: &ContentRecord) -> Block {
    let block_type = classify(&record.section_id, &record.content_type);
    StoredPayload::decode(&record.raw_text).into_block(&record.section_id, block_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("hero-heading", "text"), BlockType::Heading);
        assert_eq!(classify("cta-button", "text"), BlockType::Button);
        assert_eq!(classify("intro", "text"), BlockType::Paragraph);
        assert_eq!(classify("", ""), BlockType::Paragraph);
        // content type wins over the section id
        assert_eq!(classify("heading-embed", "html"), BlockType::Html);
        // heading is checked before button
        assert_eq!(classify("heading-button", "text"), BlockType::Heading);
    }

    #[test]
    fn test_decode_structured() {
        let payload = StoredPayload::decode(r#"{"content":"Hi","settings":{"level":"h1"}}"#);
        assert_eq!(
            payload,
            StoredPayload::Structured {
                content: "Hi".to_string(),
                settings: json!({ "level": "h1" }),
            }
        );
    }

    #[test]
    fn test_decode_falls_back_to_plain_text() {
        for raw in [
            "Just some words",
            "",
            "[1, 2, 3]",
            r#"{"title":"no content key"}"#,
            r#"{"content": 42}"#,
            r#"{"content":"unterminated"#,
        ] {
            assert_eq!(StoredPayload::decode(raw), StoredPayload::PlainText(raw.to_string()));
        }
    }

    #[test]
    fn test_plain_text_encodes_verbatim() {
        let payload = StoredPayload::PlainText("<b>raw</b>".to_string());
        assert_eq!(payload.encode(), "<b>raw</b>");
    }

    #[test]
    fn test_structured_without_settings_uses_defaults() {
        let block = StoredPayload::decode(r#"{"content":"Buy"}"#)
            .into_block("cta-button", BlockType::Button);
        assert_eq!(block.content(), "Buy");
        assert_eq!(block.settings(), &BlockSettings::default_for(BlockType::Button));
    }

    #[test]
    fn test_plain_text_record_becomes_block() {
        let record = ContentRecord {
            section_id: "hero-heading".to_string(),
            content_type: "text".to_string(),
            raw_text: "Legacy title".to_string(),
        };
        let block = record_to_block(&record);

        assert_eq!(block.id(), "hero-heading");
        assert_eq!(block.section_id(), "hero-heading");
        assert_eq!(block.block_type(), BlockType::Heading);
        assert_eq!(block.content(), "Legacy title");
        assert_eq!(block.settings(), &BlockSettings::default_for(BlockType::Heading));
    }
}
