use crate::model::ListingId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TirgusError {
    #[error("Listing not found: {0}")]
    ListingNotFound(ListingId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, TirgusError>;
