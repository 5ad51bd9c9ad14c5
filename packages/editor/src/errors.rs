//! Error types for the editor

use thiserror::Error;

use blockpress_store::StoreError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("No page selected")]
    NoPageSelected,

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::persistence::PersistenceError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Save did not report back")]
    SaveLost,
}
