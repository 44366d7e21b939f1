use crate::DocId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckerError {
    /// The doc id was already added to the index being built.
    #[error("document already indexed: {0}")]
    DuplicateDocument(DocId),

    /// Token streams from two different tokenizers cannot share one index.
    #[error("tokenizer mismatch: index uses {expected:?}, got {found:?}")]
    TokenizerMismatch { expected: String, found: String },

    #[error("no index available at {}, build one first", .0.display())]
    NoIndex(PathBuf),

    #[error("index format version {found} is not supported (expected {expected})")]
    IncompatibleIndex { found: u32, expected: u32 },

    #[error("threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("metadata error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckerError>;
