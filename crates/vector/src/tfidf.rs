use std::collections::{BTreeSet, HashMap};

use crate::sparse::SparseVector;
use crate::tokenizer::tokenize;

/// Term → dimension mapping
///
/// Dimensions are dense and assigned in sorted term order, so the same
/// corpus always yields the same vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, u32>,
}

impl Vocabulary {
    fn from_sorted(terms: BTreeSet<String>) -> Self {
        let terms: Vec<String> = terms.into_iter().collect();
        let index = terms
            .iter()
            .enumerate()
            .map(|(dim, term)| (term.clone(), dim as u32))
            .collect();
        Self { terms, index }
    }

    /// Dimension of a term, if it is in the vocabulary
    pub fn dimension(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    /// Term at a dimension
    pub fn term(&self, dim: u32) -> Option<&str> {
        self.terms.get(dim as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in dimension order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// TF-IDF model fitted on a fixed corpus
///
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, so a term present in every
/// document still weighs 1. Vectors are raw term counts times IDF, scaled
/// to unit length.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Vocabulary,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit on a corpus and return the model with one vector per document
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let terms: BTreeSet<String> = tokenized.iter().flatten().cloned().collect();
        let vocabulary = Vocabulary::from_sorted(terms);

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let distinct: BTreeSet<u32> = tokens
                .iter()
                .filter_map(|t| vocabulary.dimension(t))
                .collect();
            for dim in distinct {
                doc_freq[dim as usize] += 1;
            }
        }

        let n = documents.len() as f32;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let model = Self { vocabulary, idf };
        let vectors = tokenized
            .iter()
            .map(|tokens| model.weigh(tokens))
            .collect();

        (model, vectors)
    }

    /// Project text into the fitted space
    ///
    /// Out-of-vocabulary terms are ignored and never extend the vocabulary.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for token in tokens {
            if let Some(dim) = self.vocabulary.dimension(token) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim as usize]))
            .collect();

        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// IDF weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary
            .dimension(term)
            .map(|dim| self.idf[dim as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "What is the difference between HTTP and HTTPS?",
            "Explain the concept of object-oriented programming.",
            "What is HTTPS used for?",
        ]
    }

    #[test]
    fn test_vocabulary_sorted_and_dense() {
        let (model, _) = TfidfVectorizer::fit_transform(&corpus());
        let vocab = model.vocabulary();

        let mut sorted = vocab.terms().to_vec();
        sorted.sort();
        assert_eq!(vocab.terms(), sorted.as_slice());

        for (dim, term) in vocab.terms().iter().enumerate() {
            assert_eq!(vocab.dimension(term), Some(dim as u32));
            assert_eq!(vocab.term(dim as u32), Some(term.as_str()));
        }
        assert_eq!(vocab.dimension("protocol"), None);
    }

    #[test]
    fn test_idf_values() {
        let (model, _) = TfidfVectorizer::fit_transform(&corpus());

        // "the" appears in 2 of 3 documents, "https" in 2, "concept" in 1
        let expected_two = (4.0f32 / 3.0).ln() + 1.0;
        let expected_one = (4.0f32 / 2.0).ln() + 1.0;
        assert!((model.idf("the").unwrap() - expected_two).abs() < 1e-6);
        assert!((model.idf("https").unwrap() - expected_two).abs() < 1e-6);
        assert!((model.idf("concept").unwrap() - expected_one).abs() < 1e-6);
    }

    #[test]
    fn test_term_in_every_document_is_finite() {
        let (model, vectors) = TfidfVectorizer::fit_transform(&["rust tokio", "rust serde"]);
        let idf = model.idf("rust").unwrap();
        assert!(idf.is_finite());
        assert!((idf - 1.0).abs() < 1e-6);
        assert!(vectors.iter().all(|v| v.get(model.vocabulary().dimension("rust").unwrap()) > 0.0));
    }

    #[test]
    fn test_document_vectors_cover_distinct_terms() {
        let docs = corpus();
        let (model, vectors) = TfidfVectorizer::fit_transform(&docs);

        for (doc, vector) in docs.iter().zip(&vectors) {
            let distinct: BTreeSet<String> = tokenize(doc).into_iter().collect();
            assert_eq!(vector.nnz(), distinct.len());
            for term in &distinct {
                let dim = model.vocabulary().dimension(term).unwrap();
                assert!(vector.get(dim) > 0.0);
            }
            assert!((vector.norm() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let (model, _) = TfidfVectorizer::fit_transform(&corpus());
        let before = model.vocabulary().len();

        let query = model.transform("HTTPS protocol blockchain");
        assert_eq!(query.nnz(), 1);
        assert_eq!(model.vocabulary().len(), before);

        assert!(model.transform("quantum blockchain").is_zero());
    }
}
