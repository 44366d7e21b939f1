use crate::config::CheckConfig;
use crate::error::{CheckerError, Result};
use crate::index::CorpusIndex;
use crate::tokenizer::Tokenizer;
use crate::weighting::normalize;
use crate::{DocId, Match, WeightVector};

/// Dot product over the tokens shared by both vectors, walking the smaller one.
pub fn dot(a: &WeightVector, b: &WeightVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(token, w)| large.get(token).map(|other| w * other))
        .fold(0.0, |acc, x| acc + x)
}

/// Cosine similarity of `query` against every indexed document, in doc id order.
///
/// Documents sharing no token with the query score 0.0 and are still listed.
pub fn score(query: &WeightVector, index: &CorpusIndex) -> Vec<(DocId, f64)> {
    index
        .docs()
        .iter()
        .map(|(doc_id, vector)| (doc_id.clone(), dot(query, vector)))
        .collect()
}

/// Keep scores strictly above `threshold`, highest first. Equal scores are ordered by doc id.
pub fn rank<I>(scores: I, threshold: f64) -> Vec<Match>
where
    I: IntoIterator<Item = (DocId, f64)>,
{
    let mut matches: Vec<Match> = scores
        .into_iter()
        .filter(|(_, s)| *s > threshold)
        .map(|(doc_id, score)| Match { doc_id, score })
        .collect();
    matches.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.doc_id.cmp(&b.doc_id)));
    matches
}

/// Scores query documents against a finalized index using the tokenizer it was built with.
pub struct Checker<'a, T: Tokenizer> {
    index: &'a CorpusIndex,
    tokenizer: T,
}

impl<'a, T: Tokenizer> Checker<'a, T> {
    /// Fails if `tokenizer` is not the one recorded in `index`; scores computed from a
    /// different token space would not be comparable.
    pub fn new(index: &'a CorpusIndex, tokenizer: T) -> Result<Self> {
        if tokenizer.name() != index.tokenizer() {
            return Err(CheckerError::TokenizerMismatch {
                expected: index.tokenizer().to_string(),
                found: tokenizer.name().to_string(),
            });
        }
        Ok(Self { index, tokenizer })
    }

    pub fn index(&self) -> &CorpusIndex { self.index }

    /// Normalized weight vector of `text` under the index's IDF table.
    pub fn query_vector(&self, text: &str) -> WeightVector {
        let tf = self.tokenizer.term_frequencies(text);
        normalize(&tf, self.index.idf())
    }

    pub fn find_scores(&self, text: &str) -> Vec<(DocId, f64)> {
        score(&self.query_vector(text), self.index)
    }

    /// Ranked matches of `text` above the configured threshold.
    pub fn check(&self, text: &str, config: &CheckConfig) -> Vec<Match> {
        let matches = rank(self.find_scores(text), config.threshold);
        tracing::debug!(num_matches = matches.len(), threshold = config.threshold, "checked document");
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;
    use crate::tokenizer::{StemmingTokenizer, WhitespaceTokenizer};

    fn vector(entries: &[(&str, f64)]) -> WeightVector {
        entries.iter().map(|(t, w)| (t.to_string(), *w)).collect()
    }

    #[test]
    fn dot_only_counts_shared_tokens() {
        let a = vector(&[("x", 0.6), ("y", 0.8)]);
        let b = vector(&[("y", 1.0), ("z", 0.5), ("w", 0.1)]);
        assert!((dot(&a, &b) - 0.8).abs() < 1e-12);
        assert_eq!(dot(&a, &b), dot(&b, &a));
        assert_eq!(dot(&a, &WeightVector::new()), 0.0);
    }

    #[test]
    fn rank_filters_and_sorts() {
        let scores = vec![("A".to_string(), 0.5), ("B".to_string(), 0.2), ("C".to_string(), 0.31)];
        let ranked = rank(scores, 0.3);
        assert_eq!(ranked, vec![Match::new("A", 0.5), Match::new("C", 0.31)]);
    }

    #[test]
    fn rank_threshold_is_exclusive() {
        let ranked = rank(vec![("A".to_string(), 0.3), ("B".to_string(), 0.30001)], 0.3);
        assert_eq!(ranked, vec![Match::new("B", 0.30001)]);
    }

    #[test]
    fn rank_breaks_ties_by_doc_id() {
        let scores = vec![("b".to_string(), 0.7), ("c".to_string(), 0.9), ("a".to_string(), 0.7)];
        let ids: Vec<String> = rank(scores, 0.0).into_iter().map(|m| m.doc_id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn disjoint_vectors_score_positive_zero() {
        let a = vector(&[("x", 0.0), ("y", 1.0)]);
        let b = vector(&[("x", -0.0), ("z", 1.0)]);
        assert!(dot(&a, &b).is_sign_positive());
        assert!(dot(&a, &WeightVector::new()).is_sign_positive());

        let mut builder = IndexBuilder::new(WhitespaceTokenizer);
        builder.add_doc("A", "the cat sat").unwrap();
        builder.add_doc("B", "the dog sat").unwrap();
        let index = builder.finalize();
        let checker = Checker::new(&index, WhitespaceTokenizer).unwrap();
        for (_, s) in checker.find_scores("the cat") {
            assert!(s.is_sign_positive());
        }
    }

    #[test]
    fn checker_rejects_a_foreign_tokenizer() {
        let mut builder = IndexBuilder::new(WhitespaceTokenizer);
        builder.add_doc("A", "the cat sat").unwrap();
        let index = builder.finalize();
        let err = Checker::new(&index, StemmingTokenizer::new()).err().unwrap();
        assert!(matches!(
            err,
            CheckerError::TokenizerMismatch { ref expected, ref found }
                if expected == "whitespace" && found == "stemming"
        ));
    }
}
