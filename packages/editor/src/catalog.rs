//! # Block Catalog
//!
//! Static registry of block types and palette entries.
//!
//! The catalog never fails: an unknown id resolves to an inert fallback
//! descriptor (empty content, no settings) so rendering is never blocked.

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::{BlockSettings, BlockType};

/// Palette tab a catalog entry is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteCategory {
    Elements,
    Blocks,
    Templates,
}

impl PaletteCategory {
    pub const ALL: [PaletteCategory; 3] = [
        PaletteCategory::Elements,
        PaletteCategory::Blocks,
        PaletteCategory::Templates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteCategory::Elements => "elements",
            PaletteCategory::Blocks => "blocks",
            PaletteCategory::Templates => "templates",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown palette category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for PaletteCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaletteCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Everything the editor needs to know to create a block of one type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    /// None for the fallback descriptor
    pub block_type: Option<BlockType>,
}

impl BlockDescriptor {
    const FALLBACK: BlockDescriptor = BlockDescriptor {
        id: "unknown",
        display_name: "Unknown",
        block_type: None,
    };

    pub fn default_content(&self) -> String {
        self.block_type.map(Catalog::default_content).unwrap_or_default()
    }

    pub fn default_settings(&self) -> BlockSettings {
        self.block_type
            .map(BlockSettings::default_for)
            .unwrap_or(BlockSettings::None)
    }
}

/// One draggable entry in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: &'static str,
    pub label: &'static str,
    pub category: PaletteCategory,
    /// Block type inserted on drop; groupings without one are listing-only
    pub block_type: Option<BlockType>,
}

impl PaletteEntry {
    pub fn is_insertable(&self) -> bool {
        self.block_type.is_some()
    }
}

const GROUPINGS: [PaletteEntry; 5] = [
    PaletteEntry {
        id: "hero",
        label: "Hero section",
        category: PaletteCategory::Blocks,
        block_type: None,
    },
    PaletteEntry {
        id: "features",
        label: "Feature list",
        category: PaletteCategory::Blocks,
        block_type: None,
    },
    PaletteEntry {
        id: "call-to-action",
        label: "Call to action",
        category: PaletteCategory::Blocks,
        block_type: None,
    },
    PaletteEntry {
        id: "landing-page",
        label: "Landing page",
        category: PaletteCategory::Templates,
        block_type: None,
    },
    PaletteEntry {
        id: "about-page",
        label: "About page",
        category: PaletteCategory::Templates,
        block_type: None,
    },
];

pub struct Catalog;

impl Catalog {
    pub fn describe(block_type: BlockType) -> BlockDescriptor {
        let display_name = match block_type {
            BlockType::Heading => "Heading",
            BlockType::Paragraph => "Paragraph",
            BlockType::Button => "Button",
            BlockType::Image => "Image",
            BlockType::Video => "Video",
            BlockType::Divider => "Divider",
            BlockType::Html => "HTML",
        };

        BlockDescriptor {
            id: block_type.as_str(),
            display_name,
            block_type: Some(block_type),
        }
    }

    /// Describe by string id, falling back to an inert descriptor
    pub fn describe_id(id: &str) -> BlockDescriptor {
        match id.parse::<BlockType>() {
            Ok(block_type) => Self::describe(block_type),
            Err(_) => {
                tracing::debug!(id, "no catalog entry, using fallback descriptor");
                BlockDescriptor::FALLBACK
            }
        }
    }

    pub fn default_content(block_type: BlockType) -> String {
        match block_type {
            BlockType::Heading => "New heading",
            BlockType::Paragraph => "New paragraph text",
            BlockType::Button => "Click me",
            BlockType::Html => "<div>Custom HTML</div>",
            BlockType::Image | BlockType::Video | BlockType::Divider => "",
        }
        .to_string()
    }

    pub fn default_settings(block_type: BlockType) -> BlockSettings {
        BlockSettings::default_for(block_type)
    }

    /// Palette entries for one tab, in display order
    pub fn list_types(category: PaletteCategory) -> Vec<PaletteEntry> {
        match category {
            PaletteCategory::Elements => BlockType::ALL
                .into_iter()
                .map(|block_type| {
                    let descriptor = Self::describe(block_type);
                    PaletteEntry {
                        id: descriptor.id,
                        label: descriptor.display_name,
                        category,
                        block_type: Some(block_type),
                    }
                })
                .collect(),
            _ => GROUPINGS
                .into_iter()
                .filter(|entry| entry.category == category)
                .collect(),
        }
    }

    /// Look up a palette entry by id across every tab
    pub fn palette_entry(id: &str) -> Option<PaletteEntry> {
        PaletteCategory::ALL
            .into_iter()
            .flat_map(Self::list_types)
            .find(|entry| entry.id == id)
    }
}
