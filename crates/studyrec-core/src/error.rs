use thiserror::Error;

use crate::types::MaterialId;

#[derive(Debug, Error)]
pub enum Error {
    /// Fit was attempted over a catalog with zero records.
    #[error("Cannot fit an index over an empty corpus")]
    EmptyCorpus,

    /// Every candidate term was filtered out during fit.
    #[error("Empty vocabulary: the corpus contains only stop words or no word characters")]
    EmptyVocabulary,

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate material id: {0}")]
    DuplicateId(MaterialId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog load failed: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, Error>;
