//! Block records and block types

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::BlockSettings;

/// Closed set of block types the editor knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Heading,
    Paragraph,
    Button,
    Image,
    Video,
    Divider,
    Html,
}

impl BlockType {
    /// Catalog order
    pub const ALL: [BlockType; 7] = [
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::Button,
        BlockType::Image,
        BlockType::Video,
        BlockType::Divider,
        BlockType::Html,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::Button => "button",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Divider => "divider",
            BlockType::Html => "html",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown block type: {0}")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// One editable content unit
///
/// Fields are read-only outside the crate; all changes go through
/// `BlockDocument` so the settings record always matches the type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    id: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    content: String,
    settings: BlockSettings,
    section_id: String,
}

impl Block {
    /// A block that has never been stored; its section id is its id
    pub(crate) fn fresh(
        id: String,
        block_type: BlockType,
        content: String,
        settings: BlockSettings,
    ) -> Self {
        Self::restored(id.clone(), id, block_type, content, settings)
    }

    /// A block rebuilt from a stored content record
    pub(crate) fn restored(
        id: String,
        section_id: String,
        block_type: BlockType,
        content: String,
        settings: BlockSettings,
    ) -> Self {
        let settings = if settings.fits(block_type) {
            settings
        } else {
            tracing::warn!(%block_type, block_id = %id, "settings shape mismatch, using defaults");
            BlockSettings::default_for(block_type)
        };

        Self {
            id,
            block_type,
            content,
            settings,
            section_id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn settings_mut(&mut self) -> &mut BlockSettings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_round_trips_through_str() {
        for block_type in BlockType::ALL {
            assert_eq!(block_type.as_str().parse::<BlockType>(), Ok(block_type));
        }
        assert_eq!(
            "carousel".parse::<BlockType>(),
            Err(UnknownBlockType("carousel".to_string()))
        );
    }

    #[test]
    fn test_restored_coerces_mismatched_settings() {
        let block = Block::restored(
            "hero-heading".to_string(),
            "hero-heading".to_string(),
            BlockType::Heading,
            "Hi".to_string(),
            BlockSettings::None,
        );
        assert_eq!(block.settings(), &BlockSettings::default_for(BlockType::Heading));
    }

    #[test]
    fn test_block_serializes_with_camel_case_keys() {
        let block = Block::fresh(
            "button-1".to_string(),
            BlockType::Button,
            "Go".to_string(),
            BlockSettings::default_for(BlockType::Button),
        );
        let json = serde_json::to_value(&block).unwrap();

        assert_eq!(json["type"], "button");
        assert_eq!(json["sectionId"], "button-1");
        assert_eq!(json["settings"]["variant"], "default");
    }
}
