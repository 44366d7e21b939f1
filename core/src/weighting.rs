//! TF-IDF weighting and cosine normalization.
//!
//! [`normalize`] is the single path used both when an index is finalized and when a
//! query is prepared, so corpus and query vectors are always comparable.

use crate::{IdfTable, TermFreqs, WeightVector};

/// Log-dampened term frequency: `1 + log10(count)`.
#[inline]
pub fn tf_weight(count: u32) -> f64 {
    if count == 0 { 0.0 } else { 1.0 + (count as f64).log10() }
}

/// `log10(total_docs / doc_freq)`. Zero when the token occurs in every document.
#[inline]
pub fn idf(total_docs: usize, doc_freq: u32) -> f64 {
    if total_docs == 0 || doc_freq == 0 { return 0.0; }
    (total_docs as f64 / doc_freq as f64).log10()
}

pub fn l2_norm(vector: &WeightVector) -> f64 {
    vector.values().map(|w| w * w).sum::<f64>().sqrt()
}

/// Weight every token by `tf_weight * idf` and scale the result to unit length.
///
/// Tokens missing from `idf` weigh 0.0. If every weight is zero the vector is
/// returned as is instead of being divided by a zero norm.
pub fn normalize(term_freqs: &TermFreqs, idf: &IdfTable) -> WeightVector {
    let mut weights: WeightVector = term_freqs
        .iter()
        .map(|(token, &count)| {
            let w = tf_weight(count) * idf.get(token).copied().unwrap_or(0.0);
            (token.clone(), w)
        })
        .collect();

    let norm = l2_norm(&weights);
    if norm != 0.0 {
        for w in weights.values_mut() {
            *w /= norm;
        }
    }
    weights
}
