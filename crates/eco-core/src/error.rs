//! Catalog and lookup error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("Invalid ECO category: {0}. Must be A, B, C, D, or E.")]
    InvalidCategory(String),

    #[error("Invalid FEN board field: {0}")]
    InvalidDescriptor(String),

    #[error("Failed to restore game to {descriptor}: {source}")]
    Restore {
        descriptor: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("PGN error: {0}")]
    Pgn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),
}
