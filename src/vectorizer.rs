//! TF-IDF vectorizer for text feature extraction.
//!
//! The vectorizer builds a fixed vocabulary once at training time (stop words
//! excluded, capped at a configured maximum) and computes smoothed IDF
//! weights. At inference time it reuses the exact vocabulary and IDF weights
//! without re-fitting; tokens outside the vocabulary get zero weight.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::error::{CanardError, Result};

/// Default maximum vocabulary size.
pub const DEFAULT_MAX_FEATURES: usize = 1000;

/// A sparse feature vector: sorted `(feature index, weight)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a sparse vector from unsorted entries.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|&(idx, _)| idx);
        SparseVector { entries }
    }

    /// The nonzero entries, sorted by feature index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector has no nonzero entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product against a dense weight vector.
    ///
    /// Entries whose index falls outside the dense vector contribute zero.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter(|(idx, _)| *idx < dense.len())
            .map(|(idx, value)| value * dense[*idx])
            .sum()
    }

    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, v)| v * v)
            .sum::<f64>()
            .sqrt()
    }
}

/// TF-IDF vectorizer over a fixed, capped vocabulary.
///
/// Immutable after [`fit`](TfIdfVectorizer::fit); serialized verbatim into
/// the model artifact so training-time and inference-time feature spaces are
/// identical.
#[derive(Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: word -> feature index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each feature index.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Maximum vocabulary size.
    max_features: usize,
    /// Analyzer for tokenization (fixed; not serialized).
    #[serde(skip, default)]
    analyzer: StandardAnalyzer,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("max_features", &self.max_features)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new unfitted vectorizer with the default vocabulary cap.
    pub fn new() -> Self {
        Self::with_max_features(DEFAULT_MAX_FEATURES)
    }

    /// Create a new unfitted vectorizer with a custom vocabulary cap.
    pub fn with_max_features(max_features: usize) -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            max_features,
            analyzer: StandardAnalyzer::new(),
        }
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Builds the vocabulary (highest document frequency first, alphabetical
    /// tie-break, capped at `max_features`) and computes the smoothed IDF
    /// `ln((N + 1) / (df + 1)) + 1` for each retained term.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(CanardError::analysis(
                "cannot fit vectorizer on an empty corpus",
            ));
        }

        self.n_documents = documents.len();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = self.tokenize(doc)?;
            let unique_tokens: HashSet<String> = tokens.into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary deterministically: highest df first, then
        // alphabetical, so the retained set does not depend on hash order.
        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(self.max_features);

        // Index the retained terms alphabetically for a stable mapping.
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (idx, (term, df)) in terms.into_iter().enumerate() {
            idf.push(((self.n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        log::debug!(
            "fitted vectorizer: {} terms over {} documents",
            self.vocabulary.len(),
            self.n_documents
        );
        Ok(())
    }

    /// Transform a document into a sparse TF-IDF feature vector.
    ///
    /// Term frequencies are normalized by document length, then multiplied by
    /// the stored IDF weights. Tokens outside the vocabulary are silently
    /// ignored.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(CanardError::model(
                "vectorizer has not been fitted; train a model first",
            ));
        }

        let tokens = self.tokenize(document)?;
        let doc_length = tokens.len() as f64;

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(idx, count)| (idx, count / doc_length * self.idf[idx]))
            .collect();

        Ok(SparseVector::from_entries(entries))
    }

    /// Transform a batch of documents.
    pub fn transform_batch(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents.iter().map(|doc| self.transform(doc)).collect()
    }

    /// Whether the vectorizer has been fitted.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents seen during fitting.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Look up the feature index of a term, if it is in the vocabulary.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyzer
            .analyze(text)?
            .map(|token| token.text)
            .collect())
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "official report confirms economic growth".to_string(),
            "shocking miracle cure discovered doctors shocked".to_string(),
            "government statement confirms new policy".to_string(),
            "viral rumor claims shocking secret exposed".to_string(),
        ]
    }

    #[test]
    fn test_fit_and_transform() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        assert!(vectorizer.is_fitted());
        assert!(vectorizer.vocabulary_size() > 0);
        assert_eq!(vectorizer.n_documents(), 4);

        let features = vectorizer.transform("official government report").unwrap();
        assert!(features.nnz() > 0);
        assert!(features.nnz() <= vectorizer.vocabulary_size());
    }

    #[test]
    fn test_unknown_tokens_ignored() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        let features = vectorizer.transform("zyzzyva quux flibbertigibbet").unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_max_features_cap() {
        let mut vectorizer = TfIdfVectorizer::with_max_features(3);
        vectorizer.fit(&corpus()).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 3);

        // "shocking" appears in 2 documents, highest df, so the cap keeps it.
        assert!(vectorizer.feature_index("shocking").is_some());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let mut a = TfIdfVectorizer::with_max_features(5);
        let mut b = TfIdfVectorizer::with_max_features(5);
        a.fit(&corpus()).unwrap();
        b.fit(&corpus()).unwrap();

        let fa = a.transform("shocking report confirms growth").unwrap();
        let fb = b.transform("shocking report confirms growth").unwrap();
        assert_eq!(fa, fb);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let vectorizer = TfIdfVectorizer::new();
        assert!(vectorizer.transform("anything").is_err());
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let mut vectorizer = TfIdfVectorizer::new();
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn test_stop_words_excluded_from_vocabulary() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&["the report is not a hoax".to_string()])
            .unwrap();

        assert!(vectorizer.feature_index("the").is_none());
        assert!(vectorizer.feature_index("report").is_some());
    }

    #[test]
    fn test_sparse_vector_dot() {
        let v = SparseVector::from_entries(vec![(2, 0.5), (0, 1.0)]);
        let dense = vec![2.0, 10.0, 4.0];
        assert!((v.dot(&dense) - 4.0).abs() < 1e-12);
        // Sorted by index after construction.
        assert_eq!(v.entries()[0].0, 0);
    }

    #[test]
    fn test_serde_round_trip_preserves_features() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&corpus()).unwrap();

        let bytes = bincode::serialize(&vectorizer).unwrap();
        let restored: TfIdfVectorizer = bincode::deserialize(&bytes).unwrap();

        let text = "official statement confirms shocking rumor";
        assert_eq!(
            vectorizer.transform(text).unwrap(),
            restored.transform(text).unwrap()
        );
    }
}
