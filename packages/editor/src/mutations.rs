//! # Block Mutations
//!
//! Serializable operations on a `BlockDocument`.
//!
//! ## Semantics
//!
//! ### InsertBlock
//! - Always appends; there is no positional insert
//! - Content and settings come from the catalog defaults
//!
//! ### UpdateContent
//! - Atomic replacement of the whole content string
//!
//! ### UpdateSetting
//! - Merges one key into the block's settings record
//! - Fails if the key is not defined for the block's type
//!
//! ### RemoveBlock
//! - Deletes the block; selection cleanup is the caller's job

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BlockDocument, BlockType, SettingChange, SettingError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Append a new block with catalog defaults
    InsertBlock { block_type: String },

    /// Replace a block's content
    UpdateContent { block_id: String, content: String },

    /// Set one setting on a block
    UpdateSetting {
        block_id: String,
        key: String,
        value: String,
    },

    /// Delete a block
    RemoveBlock { block_id: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error(transparent)]
    Setting(#[from] SettingError),
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Block the mutation created, changed or removed
    pub block_id: String,
}

impl Mutation {
    pub fn insert(block_type: BlockType) -> Self {
        Mutation::InsertBlock {
            block_type: block_type.as_str().to_string(),
        }
    }

    pub fn update_setting(block_id: impl Into<String>, change: &SettingChange) -> Self {
        Mutation::UpdateSetting {
            block_id: block_id.into(),
            key: change.key().to_string(),
            value: change.value(),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert_block",
            Mutation::UpdateContent { .. } => "update_content",
            Mutation::UpdateSetting { .. } => "update_setting",
            Mutation::RemoveBlock { .. } => "remove_block",
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &BlockDocument) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { block_type } => {
                block_type
                    .parse::<BlockType>()
                    .map_err(|e| MutationError::UnknownBlockType(e.0))?;
                Ok(())
            }

            Mutation::UpdateContent { block_id, .. } | Mutation::RemoveBlock { block_id } => {
                doc.get(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                Ok(())
            }

            Mutation::UpdateSetting { block_id, key, value } => {
                let block = doc
                    .get(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;

                let change = SettingChange::parse(key, value)?;
                if block.settings().get(change.key()).is_none() {
                    return Err(SettingError::NotApplicable {
                        key: key.clone(),
                        block_type: block.block_type(),
                    }
                    .into());
                }
                Ok(())
            }
        }
    }

    /// Apply to the document with validation, returning the affected block id
    pub(crate) fn apply(&self, doc: &mut BlockDocument) -> Result<String, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::InsertBlock { block_type } => {
                let block_type = block_type
                    .parse::<BlockType>()
                    .map_err(|e| MutationError::UnknownBlockType(e.0))?;
                Ok(doc.append_new(block_type).id().to_string())
            }

            Mutation::UpdateContent { block_id, content } => {
                let block = doc
                    .get_mut(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                block.set_content(content.clone());
                Ok(block_id.clone())
            }

            Mutation::UpdateSetting { block_id, key, value } => {
                let change = SettingChange::parse(key, value)?;
                let block = doc
                    .get_mut(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                let block_type = block.block_type();
                block.settings_mut().apply(block_type, &change)?;
                Ok(block_id.clone())
            }

            Mutation::RemoveBlock { block_id } => {
                doc.take(block_id)
                    .ok_or_else(|| MutationError::BlockNotFound(block_id.clone()))?;
                Ok(block_id.clone())
            }
        }
    }
}
