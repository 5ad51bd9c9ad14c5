//! # Block Settings
//!
//! Per-type settings records.
//!
//! Each block type owns a closed record of settings, so a block can never
//! carry a key that its type does not define. The only place string keys
//! exist is the parsing boundary: [`SettingChange::parse`] turns a
//! `(key, value)` pair into a typed change or rejects it.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

use crate::BlockType;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingError {
    #[error("Unknown setting: {0}")]
    UnknownKey(String),

    #[error("Invalid value {value:?} for setting {key}")]
    InvalidValue { key: String, value: String },

    #[error("Setting {key} does not apply to {block_type} blocks")]
    NotApplicable { key: String, block_type: BlockType },
}

/// A setting value outside its enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub const ALL: [Align; 3] = [Align::Left, Align::Center, Align::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

impl FromStr for Align {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            _ => Err(UnknownVariant::new("alignment", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    #[default]
    H2,
    H3,
}

impl HeadingLevel {
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

impl FromStr for HeadingLevel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h1" => Ok(HeadingLevel::H1),
            "h2" => Ok(HeadingLevel::H2),
            "h3" => Ok(HeadingLevel::H3),
            _ => Err(UnknownVariant::new("heading level", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Sm,
    #[default]
    Default,
    Lg,
}

impl ButtonSize {
    pub const ALL: [ButtonSize; 3] = [ButtonSize::Sm, ButtonSize::Default, ButtonSize::Lg];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonSize::Sm => "sm",
            ButtonSize::Default => "default",
            ButtonSize::Lg => "lg",
        }
    }
}

impl FromStr for ButtonSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sm" => Ok(ButtonSize::Sm),
            "default" => Ok(ButtonSize::Default),
            "lg" => Ok(ButtonSize::Lg),
            _ => Err(UnknownVariant::new("button size", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Default,
    Outline,
    Secondary,
}

impl ButtonVariant {
    pub const ALL: [ButtonVariant; 3] = [
        ButtonVariant::Default,
        ButtonVariant::Outline,
        ButtonVariant::Secondary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonVariant::Default => "default",
            ButtonVariant::Outline => "outline",
            ButtonVariant::Secondary => "secondary",
        }
    }
}

impl FromStr for ButtonVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ButtonVariant::Default),
            "outline" => Ok(ButtonVariant::Outline),
            "secondary" => Ok(ButtonVariant::Secondary),
            _ => Err(UnknownVariant::new("button variant", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingSettings {
    pub level: HeadingLevel,
    pub align: Align,
    pub font_size: String,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            level: HeadingLevel::H2,
            align: Align::Left,
            font_size: "32px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphSettings {
    pub align: Align,
    pub font_size: String,
}

impl Default for ParagraphSettings {
    fn default() -> Self {
        Self {
            align: Align::Left,
            font_size: "16px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonSettings {
    pub size: ButtonSize,
    pub variant: ButtonVariant,
    pub align: Align,
}

/// Settings for one block, keyed by its type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSettings {
    Heading(HeadingSettings),
    Paragraph(ParagraphSettings),
    Button(ButtonSettings),
    /// Divider, image, video and html blocks carry no settings
    None,
}

impl BlockSettings {
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Heading => BlockSettings::Heading(HeadingSettings::default()),
            BlockType::Paragraph => BlockSettings::Paragraph(ParagraphSettings::default()),
            BlockType::Button => BlockSettings::Button(ButtonSettings::default()),
            BlockType::Image | BlockType::Video | BlockType::Divider | BlockType::Html => {
                BlockSettings::None
            }
        }
    }

    /// Whether this record is the shape `block_type` requires
    pub fn fits(&self, block_type: BlockType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(&Self::default_for(block_type))
    }

    /// Setting names, in display order
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            BlockSettings::Heading(_) => &["level", "align", "fontSize"],
            BlockSettings::Paragraph(_) => &["align", "fontSize"],
            BlockSettings::Button(_) => &["size", "variant", "align"],
            BlockSettings::None => &[],
        }
    }

    /// String value of a setting, if this record defines it
    pub fn get(&self, key: &str) -> Option<String> {
        match (self, key) {
            (BlockSettings::Heading(s), "level") => Some(s.level.as_str().to_string()),
            (BlockSettings::Heading(s), "align") => Some(s.align.as_str().to_string()),
            (BlockSettings::Heading(s), "fontSize") => Some(s.font_size.clone()),
            (BlockSettings::Paragraph(s), "align") => Some(s.align.as_str().to_string()),
            (BlockSettings::Paragraph(s), "fontSize") => Some(s.font_size.clone()),
            (BlockSettings::Button(s), "size") => Some(s.size.as_str().to_string()),
            (BlockSettings::Button(s), "variant") => Some(s.variant.as_str().to_string()),
            (BlockSettings::Button(s), "align") => Some(s.align.as_str().to_string()),
            _ => None,
        }
    }

    /// Merge one change into the record.
    ///
    /// Leaves the record untouched when the change's key is not defined for
    /// this block type.
    pub fn apply(
        &mut self,
        block_type: BlockType,
        change: &SettingChange,
    ) -> Result<(), SettingError> {
        match (self, change) {
            (BlockSettings::Heading(s), SettingChange::Level(level)) => s.level = *level,
            (BlockSettings::Heading(s), SettingChange::Align(align)) => s.align = *align,
            (BlockSettings::Heading(s), SettingChange::FontSize(size)) => {
                s.font_size = size.clone()
            }
            (BlockSettings::Paragraph(s), SettingChange::Align(align)) => s.align = *align,
            (BlockSettings::Paragraph(s), SettingChange::FontSize(size)) => {
                s.font_size = size.clone()
            }
            (BlockSettings::Button(s), SettingChange::Size(size)) => s.size = *size,
            (BlockSettings::Button(s), SettingChange::Variant(variant)) => s.variant = *variant,
            (BlockSettings::Button(s), SettingChange::Align(align)) => s.align = *align,
            _ => {
                return Err(SettingError::NotApplicable {
                    key: change.key().to_string(),
                    block_type,
                })
            }
        }
        Ok(())
    }

    /// Decode stored settings for `block_type`.
    ///
    /// Missing keys take the type default, unknown keys are dropped, and a
    /// value that does not decode falls back to the full default record.
    pub fn from_json(block_type: BlockType, value: &serde_json::Value) -> Self {
        let decoded = match block_type {
            BlockType::Heading => serde_json::from_value(value.clone()).map(BlockSettings::Heading),
            BlockType::Paragraph => {
                serde_json::from_value(value.clone()).map(BlockSettings::Paragraph)
            }
            BlockType::Button => serde_json::from_value(value.clone()).map(BlockSettings::Button),
            _ => Ok(BlockSettings::None),
        };

        match decoded {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    %block_type,
                    error = %e,
                    "stored settings did not decode, using defaults"
                );
                Self::default_for(block_type)
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

impl Serialize for BlockSettings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockSettings::Heading(s) => s.serialize(serializer),
            BlockSettings::Paragraph(s) => s.serialize(serializer),
            BlockSettings::Button(s) => s.serialize(serializer),
            BlockSettings::None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// One typed settings change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    Level(HeadingLevel),
    Align(Align),
    FontSize(String),
    Size(ButtonSize),
    Variant(ButtonVariant),
}

impl SettingChange {
    /// Parse a `(key, value)` pair from the string boundary
    pub fn parse(key: &str, value: &str) -> Result<Self, SettingError> {
        let invalid = || SettingError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "level" => value.parse().map(SettingChange::Level).map_err(|_| invalid()),
            "align" => value.parse().map(SettingChange::Align).map_err(|_| invalid()),
            "size" => value.parse().map(SettingChange::Size).map_err(|_| invalid()),
            "variant" => value.parse().map(SettingChange::Variant).map_err(|_| invalid()),
            "fontSize" => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(invalid())
                } else {
                    Ok(SettingChange::FontSize(trimmed.to_string()))
                }
            }
            _ => Err(SettingError::UnknownKey(key.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SettingChange::Level(_) => "level",
            SettingChange::Align(_) => "align",
            SettingChange::FontSize(_) => "fontSize",
            SettingChange::Size(_) => "size",
            SettingChange::Variant(_) => "variant",
        }
    }

    pub fn value(&self) -> String {
        match self {
            SettingChange::Level(v) => v.as_str().to_string(),
            SettingChange::Align(v) => v.as_str().to_string(),
            SettingChange::FontSize(v) => v.clone(),
            SettingChange::Size(v) => v.as_str().to_string(),
            SettingChange::Variant(v) => v.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_from_str() {
        assert_eq!("center".parse::<Align>(), Ok(Align::Center));
        assert_eq!("lg".parse::<ButtonSize>(), Ok(ButtonSize::Lg));

        let err = "diagonal".parse::<Align>().unwrap_err();
        assert_eq!(err, UnknownVariant::new("alignment", "diagonal"));
        assert_eq!(err.to_string(), "Unknown alignment: diagonal");
        assert!("h4".parse::<HeadingLevel>().is_err());
        assert!("ghost".parse::<ButtonVariant>().is_err());
    }

    fn json_keys(settings: &BlockSettings) -> Vec<String> {
        let mut keys: Vec<String> = settings
            .to_json()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_default_key_sets() {
        let expected: [(BlockType, &[&str]); 7] = [
            (BlockType::Heading, &["align", "fontSize", "level"]),
            (BlockType::Paragraph, &["align", "fontSize"]),
            (BlockType::Button, &["align", "size", "variant"]),
            (BlockType::Image, &[]),
            (BlockType::Video, &[]),
            (BlockType::Divider, &[]),
            (BlockType::Html, &[]),
        ];

        for (block_type, keys) in expected {
            let settings = BlockSettings::default_for(block_type);
            assert_eq!(json_keys(&settings), keys, "{block_type}");

            let mut declared: Vec<&str> = settings.keys().to_vec();
            declared.sort();
            assert_eq!(declared, keys, "{block_type}");
        }
    }

    #[test]
    fn test_default_values() {
        assert_eq!(
            BlockSettings::default_for(BlockType::Heading).to_json(),
            json!({ "level": "h2", "align": "left", "fontSize": "32px" })
        );
        assert_eq!(
            BlockSettings::default_for(BlockType::Paragraph).to_json(),
            json!({ "align": "left", "fontSize": "16px" })
        );
        assert_eq!(
            BlockSettings::default_for(BlockType::Button).to_json(),
            json!({ "size": "default", "variant": "default", "align": "left" })
        );
    }

    #[test]
    fn test_parse_rejects_unknown_key_and_bad_values() {
        assert_eq!(
            SettingChange::parse("nonexistentKey", "x"),
            Err(SettingError::UnknownKey("nonexistentKey".to_string()))
        );
        assert!(matches!(
            SettingChange::parse("level", "h7"),
            Err(SettingError::InvalidValue { .. })
        ));
        assert!(SettingChange::parse("fontSize", "  ").is_err());
        assert_eq!(
            SettingChange::parse("fontSize", " 40px "),
            Ok(SettingChange::FontSize("40px".to_string()))
        );
    }

    #[test]
    fn test_apply_rejects_keys_outside_the_type() {
        let mut settings = BlockSettings::default_for(BlockType::Paragraph);
        let before = settings.clone();

        let result = settings.apply(BlockType::Paragraph, &SettingChange::Level(HeadingLevel::H1));
        assert!(matches!(result, Err(SettingError::NotApplicable { .. })));
        assert_eq!(settings, before);

        let mut none = BlockSettings::None;
        assert!(none
            .apply(BlockType::Divider, &SettingChange::Align(Align::Center))
            .is_err());
        assert_eq!(none, BlockSettings::None);
    }

    #[test]
    fn test_from_json_fills_missing_and_drops_extra_keys() {
        let settings = BlockSettings::from_json(
            BlockType::Heading,
            &json!({ "level": "h1", "color": "red" }),
        );
        assert_eq!(
            settings.to_json(),
            json!({ "level": "h1", "align": "left", "fontSize": "32px" })
        );
    }

    #[test]
    fn test_from_json_bad_value_falls_back_to_default() {
        let settings = BlockSettings::from_json(BlockType::Button, &json!({ "size": "huge" }));
        assert_eq!(settings, BlockSettings::default_for(BlockType::Button));

        let settings = BlockSettings::from_json(BlockType::Heading, &json!("not an object"));
        assert_eq!(settings, BlockSettings::default_for(BlockType::Heading));
    }

    #[test]
    fn test_fits() {
        assert!(BlockSettings::None.fits(BlockType::Html));
        assert!(!BlockSettings::None.fits(BlockType::Heading));
        assert!(BlockSettings::default_for(BlockType::Button).fits(BlockType::Button));
    }
}
