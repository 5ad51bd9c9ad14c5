//! # Block Document
//!
//! The ordered blocks of one page and their editing state.
//!
//! Order is render order; there is no position field. Every Block in a
//! document has a unique id, and every mutation either fully applies or
//! leaves the document untouched.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Save → (page switch) → discarded
//!   ↓      ↓      ↓
//! records  Mutations  records
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    Block, BlockType, Catalog, Clock, IdGenerator, Mutation, MutationError, MutationResult,
    SettingChange,
};

#[derive(Debug, Clone)]
pub struct BlockDocument {
    page_id: String,

    /// Current version number (increments on each applied mutation)
    version: u64,

    /// Highest version a completed save has covered
    saved_version: u64,

    blocks: Vec<Block>,
    ids: IdGenerator,
}

impl BlockDocument {
    /// Empty document for a page
    pub fn new(page_id: impl Into<String>) -> Self {
        Self::with_id_generator(page_id, IdGenerator::default())
    }

    pub fn with_clock(page_id: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self::with_id_generator(page_id, IdGenerator::new(clock))
    }

    fn with_id_generator(page_id: impl Into<String>, ids: IdGenerator) -> Self {
        Self {
            page_id: page_id.into(),
            version: 0,
            saved_version: 0,
            blocks: Vec::new(),
            ids,
        }
    }

    /// Document populated from already-built blocks, e.g. restored records.
    ///
    /// A block whose id repeats an earlier one is dropped.
    pub fn from_blocks(
        page_id: impl Into<String>,
        blocks: Vec<Block>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut doc = Self::with_clock(page_id, clock);
        let mut seen = HashSet::new();

        for block in blocks {
            if !seen.insert(block.id().to_string()) {
                tracing::warn!(block_id = block.id(), "duplicate block id, dropping");
                continue;
            }
            doc.blocks.push(block);
        }

        doc
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True when mutations happened after the last completed save
    pub fn is_dirty(&self) -> bool {
        self.version > self.saved_version
    }

    /// Record that a save covering `version` completed
    pub fn mark_saved(&mut self, version: u64) {
        self.saved_version = self.saved_version.max(version);
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.ids.clock()
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let block_id = mutation.apply(self)?;
        self.version += 1;

        tracing::debug!(
            page_id = %self.page_id,
            mutation = mutation.name(),
            block_id = %block_id,
            version = self.version,
            "applied mutation"
        );

        Ok(MutationResult {
            version: self.version,
            block_id,
        })
    }

    /// Append a block of `block_type` with catalog defaults
    pub fn insert(&mut self, block_type: BlockType) -> Block {
        let block = self.append_new(block_type).clone();
        self.version += 1;
        tracing::debug!(page_id = %self.page_id, block_id = block.id(), "inserted block");
        block
    }

    /// Replace content; logged no-op when the id is unknown
    pub fn update_content(&mut self, block_id: &str, content: impl Into<String>) -> bool {
        self.apply_logged(Mutation::UpdateContent {
            block_id: block_id.to_string(),
            content: content.into(),
        })
    }

    /// Merge one `(key, value)` setting; logged no-op for keys the
    /// block's type does not define
    pub fn update_setting(&mut self, block_id: &str, key: &str, value: &str) -> bool {
        self.apply_logged(Mutation::UpdateSetting {
            block_id: block_id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn apply_setting(&mut self, block_id: &str, change: &SettingChange) -> bool {
        self.apply_logged(Mutation::update_setting(block_id, change))
    }

    /// Delete a block; logged no-op when the id is unknown
    pub fn remove(&mut self, block_id: &str) -> bool {
        self.apply_logged(Mutation::RemoveBlock {
            block_id: block_id.to_string(),
        })
    }

    fn apply_logged(&mut self, mutation: Mutation) -> bool {
        match self.apply(mutation.clone()) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    page_id = %self.page_id,
                    mutation = mutation.name(),
                    error = %e,
                    "ignored invalid mutation"
                );
                false
            }
        }
    }

    /// Blocks in render order
    pub fn to_ordered_list(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == block_id)
    }

    pub fn contains(&self, block_id: &str) -> bool {
        self.get(block_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub(crate) fn get_mut(&mut self, block_id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id() == block_id)
    }

    pub(crate) fn take(&mut self, block_id: &str) -> Option<Block> {
        let pos = self.blocks.iter().position(|b| b.id() == block_id)?;
        Some(self.blocks.remove(pos))
    }

    /// Create and append a block without bumping the version
    pub(crate) fn append_new(&mut self, block_type: BlockType) -> &Block {
        let blocks = &self.blocks;
        let id = self
            .ids
            .new_id(block_type, |candidate| blocks.iter().any(|b| b.id() == candidate));

        let descriptor = Catalog::describe(block_type);
        self.blocks.push(Block::fresh(
            id,
            block_type,
            descriptor.default_content(),
            descriptor.default_settings(),
        ));

        &self.blocks[self.blocks.len() - 1]
    }
}
