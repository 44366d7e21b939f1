use crate::error::{CheckerError, Result};
use crate::tokenizer::Tokenizer;
use crate::weighting::{idf, normalize};
use crate::{DocId, IdfTable, TermFreqs, WeightVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An index that is still accepting documents.
///
/// Holds raw term frequencies and document frequencies until [`IndexBuilder::finalize`]
/// turns them into IDF weights and normalized document vectors. Finalizing consumes
/// the builder, so no document can be added to a sealed index.
pub struct IndexBuilder<T: Tokenizer> {
    tokenizer: T,
    term_freqs: BTreeMap<DocId, TermFreqs>,
    doc_freq: HashMap<String, u32>,
}

impl<T: Tokenizer> IndexBuilder<T> {
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer, term_freqs: BTreeMap::new(), doc_freq: HashMap::new() }
    }

    pub fn tokenizer(&self) -> &T { &self.tokenizer }

    pub fn len(&self) -> usize { self.term_freqs.len() }

    pub fn is_empty(&self) -> bool { self.term_freqs.is_empty() }

    pub fn contains(&self, doc_id: &str) -> bool { self.term_freqs.contains_key(doc_id) }

    /// Tokenize `text` and record it under `doc_id`.
    pub fn add_doc(&mut self, doc_id: impl Into<DocId>, text: &str) -> Result<()> {
        let doc_id = doc_id.into();
        if self.contains(&doc_id) {
            return Err(CheckerError::DuplicateDocument(doc_id));
        }
        let tf = self.tokenizer.term_frequencies(text);
        self.insert(doc_id, tf);
        Ok(())
    }

    /// Record an already tokenized document. `term_freqs` must come from the same tokenizer.
    pub fn add_term_freqs(&mut self, doc_id: impl Into<DocId>, term_freqs: TermFreqs) -> Result<()> {
        let doc_id = doc_id.into();
        if self.contains(&doc_id) {
            return Err(CheckerError::DuplicateDocument(doc_id));
        }
        self.insert(doc_id, term_freqs);
        Ok(())
    }

    fn insert(&mut self, doc_id: DocId, mut term_freqs: TermFreqs) {
        // a token with no occurrence is not in the document
        term_freqs.retain(|_, count| *count > 0);
        // each distinct token counts once per document, whatever its tf
        for token in term_freqs.keys() {
            *self.doc_freq.entry(token.clone()).or_insert(0) += 1;
        }
        tracing::debug!(doc_id = %doc_id, num_terms = term_freqs.len(), "added document");
        self.term_freqs.insert(doc_id, term_freqs);
    }

    /// Absorb a builder that indexed a disjoint partition of the corpus.
    ///
    /// Nothing is merged if any doc id is present in both builders or if the two
    /// builders tokenize differently.
    pub fn merge(&mut self, other: IndexBuilder<T>) -> Result<()> {
        if self.tokenizer.name() != other.tokenizer.name() {
            return Err(CheckerError::TokenizerMismatch {
                expected: self.tokenizer.name().to_string(),
                found: other.tokenizer.name().to_string(),
            });
        }
        if let Some(dup) = other.term_freqs.keys().find(|id| self.contains(id)) {
            return Err(CheckerError::DuplicateDocument(dup.clone()));
        }
        for (token, count) in other.doc_freq {
            *self.doc_freq.entry(token).or_insert(0) += count;
        }
        self.term_freqs.extend(other.term_freqs);
        Ok(())
    }

    /// Compute IDF weights and replace every document's term frequencies with its
    /// normalized weight vector.
    pub fn finalize(self) -> CorpusIndex {
        let total_docs = self.term_freqs.len();
        let idf_table: IdfTable = self
            .doc_freq
            .into_iter()
            .map(|(token, df)| (token, idf(total_docs, df)))
            .collect();
        let docs: BTreeMap<DocId, WeightVector> = self
            .term_freqs
            .into_iter()
            .map(|(doc_id, tf)| {
                let vector = normalize(&tf, &idf_table);
                (doc_id, vector)
            })
            .collect();
        tracing::info!(num_docs = total_docs, num_terms = idf_table.len(), "index finalized");
        CorpusIndex { tokenizer: self.tokenizer.name().to_string(), idf: idf_table, docs }
    }
}

/// A sealed, read-only corpus index: the IDF table plus one unit weight vector per document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorpusIndex {
    tokenizer: String,
    idf: IdfTable,
    docs: BTreeMap<DocId, WeightVector>,
}

impl CorpusIndex {
    /// Name of the tokenizer the index was built with.
    pub fn tokenizer(&self) -> &str { &self.tokenizer }

    pub fn idf(&self) -> &IdfTable { &self.idf }

    /// Document vectors in ascending doc id order.
    pub fn docs(&self) -> &BTreeMap<DocId, WeightVector> { &self.docs }

    pub fn doc(&self, doc_id: &str) -> Option<&WeightVector> { self.docs.get(doc_id) }

    pub fn num_docs(&self) -> usize { self.docs.len() }

    pub fn vocabulary_size(&self) -> usize { self.idf.len() }
}
