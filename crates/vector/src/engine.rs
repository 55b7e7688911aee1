use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use skillcompass_common::{Result, SkillCompassError};
use std::time::Instant;
use tracing::{debug, info};

use crate::neighbors::NeighborIndex;
use crate::tfidf::TfidfVectorizer;
use crate::types::{IndexStats, QuestionRecord, SearchHit};

/// Question similarity index
///
/// Built once from an ordered corpus and immutable afterwards; every
/// method takes `&self`, so one instance can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    records: Vec<QuestionRecord>,
    vectorizer: TfidfVectorizer,
    neighbors: NeighborIndex,
    /// Positions of questions with no indexable terms
    termless: Vec<usize>,
    fingerprint: String,
    built_at: DateTime<Utc>,
}

impl CorpusIndex {
    /// Build from question texts; order defines the result index
    pub fn build<I, S>(corpus: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = corpus
            .into_iter()
            .enumerate()
            .map(|(index, text)| QuestionRecord::new(index, text))
            .collect();
        Self::build_from_records(records)
    }

    /// Build from loaded records
    ///
    /// Record ordinals are reassigned to their position in `records`.
    pub fn build_from_records(mut records: Vec<QuestionRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(SkillCompassError::EmptyCorpus);
        }

        let started = Instant::now();
        for (position, record) in records.iter_mut().enumerate() {
            record.index = position;
        }

        let texts: Vec<&str> = records.iter().map(|r| r.question.as_str()).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&texts);
        let termless = vectors
            .iter()
            .enumerate()
            .filter(|(_, vector)| vector.is_zero())
            .map(|(position, _)| position)
            .collect();
        let neighbors = NeighborIndex::fit(vectors, vectorizer.vocabulary().len());
        let fingerprint = fingerprint(&texts);

        info!(
            "Corpus index built - {} questions, {} terms in {:?}",
            records.len(),
            vectorizer.vocabulary().len(),
            started.elapsed()
        );

        Ok(Self {
            records,
            vectorizer,
            neighbors,
            termless,
            fingerprint,
            built_at: Utc::now(),
        })
    }

    /// Texts of the `k` questions nearest to `query`, nearest first
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        Ok(self
            .search_hits(query, k)?
            .into_iter()
            .map(|hit| hit.record.question)
            .collect())
    }

    /// Same lookup as [`search`](Self::search), keeping distances and records
    ///
    /// An empty or fully out-of-vocabulary query is not an error: every
    /// question is then at distance 1.0 and the first `k` in corpus order
    /// are returned. A question with no indexable terms (e.g. "C") is at
    /// distance 0.0 when the query is the same text.
    pub fn search_hits(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(SkillCompassError::invalid_input(
                "number of results must be at least 1",
            ));
        }

        let query_vector = self.vectorizer.transform(query);
        debug!(
            "Searching for: {} (k={}, matched_terms={})",
            query,
            k,
            query_vector.nnz()
        );

        let pinned = self.termless_matches(query);
        let hits: Vec<SearchHit> = self
            .neighbors
            .kneighbors_pinned(&query_vector, k, &pinned)
            .into_iter()
            .enumerate()
            .map(|(rank, neighbor)| SearchHit {
                rank,
                distance: neighbor.distance,
                score: 1.0 - neighbor.distance,
                record: self.records[neighbor.index].clone(),
            })
            .collect();

        debug!("Search completed - {} results", hits.len());
        Ok(hits)
    }

    fn termless_matches(&self, query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        self.termless
            .iter()
            .copied()
            .filter(|&position| self.records[position].question.trim() == query)
            .collect()
    }

    /// Distinct non-empty domains in first-seen order
    ///
    /// Domains differing only in case or surrounding whitespace are one
    /// domain, listed with the first spelling seen.
    pub fn domains(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut domains: Vec<String> = Vec::new();
        for domain in self.records.iter().filter_map(|r| r.domain.as_deref()) {
            let key = domain_key(domain);
            if !key.is_empty() && !seen.contains(&key) {
                seen.push(key);
                domains.push(domain.trim().to_string());
            }
        }
        domains
    }

    /// Questions of one domain (case-insensitive), in corpus order
    pub fn questions_in_domain(&self, domain: &str) -> Vec<&QuestionRecord> {
        let wanted = domain_key(domain);
        self.records
            .iter()
            .filter(|r| r.domain.as_deref().is_some_and(|d| domain_key(d) == wanted))
            .collect()
    }

    /// Record at a corpus position
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: an index cannot be built from an empty corpus
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn neighbors(&self) -> &NeighborIndex {
        &self.neighbors
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.records.len(),
            vocabulary_size: self.vectorizer.vocabulary().len(),
            fingerprint: self.fingerprint.clone(),
            built_at: self.built_at,
        }
    }
}

fn domain_key(domain: &str) -> String {
    domain.trim().to_lowercase()
}

fn fingerprint(texts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (position, text) in texts.iter().enumerate() {
        if position > 0 {
            hasher.update(b"\n");
        }
        hasher.update(text.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_corpus() -> Vec<&'static str> {
        vec![
            "What is the difference between HTTP and HTTPS?",
            "Explain the concept of object-oriented programming.",
            "What is HTTPS used for?",
        ]
    }

    #[test]
    fn test_empty_corpus() {
        let result = CorpusIndex::build(Vec::<String>::new());
        assert!(matches!(result, Err(SkillCompassError::EmptyCorpus)));
    }

    #[test]
    fn test_https_example() {
        let index = CorpusIndex::build(sample_corpus()).unwrap();
        let hits = index.search_hits("HTTPS protocol", 2).unwrap();

        let mut found: Vec<usize> = hits.iter().map(|h| h.record.index).collect();
        found.sort();
        assert_eq!(found, vec![0, 2]);
        assert!(hits[0].distance <= hits[1].distance);

        let all = index.search_hits("HTTPS protocol", 3).unwrap();
        assert_eq!(all[2].record.index, 1);
        assert!((all[2].distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_exact_match_ranks_first() {
        let corpus = sample_corpus();
        let index = CorpusIndex::build(corpus.clone()).unwrap();

        for (position, text) in corpus.iter().enumerate() {
            let hits = index.search_hits(text, 1).unwrap();
            assert_eq!(hits[0].record.index, position);
            assert!(hits[0].distance < 1e-5);
        }
    }

    #[test]
    fn test_k_larger_than_corpus() {
        let index = CorpusIndex::build(sample_corpus()).unwrap();
        let results = index.search("programming", 10).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], "Explain the concept of object-oriented programming.");
    }

    #[test]
    fn test_zero_k_rejected() {
        let index = CorpusIndex::build(sample_corpus()).unwrap();
        assert!(matches!(
            index.search("https", 0),
            Err(SkillCompassError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_query_returns_corpus_order() {
        let index = CorpusIndex::build(sample_corpus()).unwrap();
        let results = index.search("", 2).unwrap();
        assert_eq!(results, vec![sample_corpus()[0], sample_corpus()[1]]);

        let oov = index.search("zebra quantum", 3).unwrap();
        assert_eq!(oov, sample_corpus());
    }

    #[test]
    fn test_duplicates_tie_break_by_index() {
        let index = CorpusIndex::build(vec![
            "Explain closures in Rust",
            "What is a REST API?",
            "Explain closures in Rust",
        ])
        .unwrap();

        let hits = index.search_hits("closures", 3).unwrap();
        assert_eq!(hits[0].record.index, 0);
        assert_eq!(hits[1].record.index, 2);
        assert_eq!(hits[0].distance, hits[1].distance);
    }

    #[test]
    fn test_domains() {
        let records = vec![
            QuestionRecord::new(0, "What is a closure?").with_domain("JavaScript"),
            QuestionRecord::new(1, "What is a pointer?").with_domain("C"),
            QuestionRecord::new(2, "Explain hoisting").with_domain("javascript "),
            QuestionRecord::new(3, "What is SQL?"),
        ];
        let index = CorpusIndex::build_from_records(records).unwrap();

        assert_eq!(index.domains(), vec!["JavaScript", "C"]);

        let js: Vec<usize> = index
            .questions_in_domain("JAVASCRIPT")
            .iter()
            .map(|r| r.index)
            .collect();
        assert_eq!(js, vec![0, 2]);
        assert!(index.questions_in_domain("Go").is_empty());
    }

    #[test]
    fn test_domain_listing_matches_lookup() {
        let records = vec![
            QuestionRecord::new(0, "What is a closure?").with_domain(" Web "),
            QuestionRecord::new(1, "What is CSS?").with_domain("WEB"),
        ];
        let index = CorpusIndex::build_from_records(records).unwrap();

        let domains = index.domains();
        assert_eq!(domains, vec!["Web"]);
        assert_eq!(index.questions_in_domain(&domains[0]).len(), 2);
    }

    #[test]
    fn test_termless_question_exact_match() {
        let index = CorpusIndex::build(["What is Go?", "Explain Rust traits", "C"]).unwrap();

        let hits = index.search_hits("C", 1).unwrap();
        assert_eq!(hits[0].record.question, "C");
        assert_eq!(hits[0].distance, 0.0);

        // Surrounding whitespace does not matter
        assert_eq!(index.search(" C ", 1).unwrap(), vec!["C"]);

        // Other term-less queries still fall back to corpus order
        assert_eq!(index.search("?", 1).unwrap(), vec!["What is Go?"]);
    }

    #[test]
    fn test_empty_query_ignores_blank_question() {
        let index = CorpusIndex::build(["What is Go?", "  "]).unwrap();
        assert_eq!(index.search("", 1).unwrap(), vec!["What is Go?"]);
    }

    #[test]
    fn test_records_reindexed() {
        let records = vec![
            QuestionRecord::new(7, "first"),
            QuestionRecord::new(3, "second"),
        ];
        let index = CorpusIndex::build_from_records(records).unwrap();
        assert_eq!(index.get(0).unwrap().question, "first");
        assert_eq!(index.get(1).unwrap().index, 1);
    }

    #[test]
    fn test_stats() {
        let index = CorpusIndex::build(sample_corpus()).unwrap();
        let stats = index.stats();
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.vocabulary_size, index.vectorizer().vocabulary().len());
        assert_eq!(stats.fingerprint.len(), 64);

        let again = CorpusIndex::build(sample_corpus()).unwrap();
        assert_eq!(again.stats().fingerprint, stats.fingerprint);
    }

    #[test]
    fn test_index_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CorpusIndex>();
    }
}
