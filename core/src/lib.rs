use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod config;
pub mod error;
pub mod index;
pub mod persist;
pub mod score;
pub mod tokenizer;
pub mod weighting;

pub use config::{CheckConfig, DEFAULT_THRESHOLD};
pub use error::{CheckerError, Result};
pub use index::{CorpusIndex, IndexBuilder};
pub use score::Checker;
pub use tokenizer::{StemmingTokenizer, Tokenizer, WhitespaceTokenizer};

/// Stable handle of an indexed document, e.g. its file path.
pub type DocId = String;
/// Raw occurrence count per token for a single document.
pub type TermFreqs = HashMap<String, u32>;
/// Token -> tf-idf weight, unit L2 norm unless all zero.
pub type WeightVector = HashMap<String, f64>;
/// Token -> log10(total_docs / doc_freq).
pub type IdfTable = HashMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub doc_id: DocId,
    pub score: f64,
}

impl Match {
    pub fn new(doc_id: impl Into<DocId>, score: f64) -> Self {
        Self { doc_id: doc_id.into(), score }
    }
}
