//! # Blockpress Store
//!
//! Page/Content store interface consumed by the block editor.
//!
//! A store holds two things:
//! - **Pages**: `PageRef` records (id, slug, title, status)
//! - **Content records**: one text payload per `(page_id, section_id)`
//!
//! The editor only ever reads pages, reads a page's records, and upserts
//! records one at a time. Two backends ship with the crate:
//!
//! - [`MemoryStore`]: in-process, for tests and throwaway sessions
//! - [`JsonFileStore`]: persisted to a single JSON file on disk

mod error;
mod file;
mod memory;
mod state;
mod traits;
mod types;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::PageStore;
pub use types::{page_id_for_slug, ContentRecord, DefaultPage, PageRef, PageStatus};
