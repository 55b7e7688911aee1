use serde::Serialize;
use skillcompass_common::{Result, SkillCompassError};
use std::sync::{Arc, OnceLock};
use tracing::{error, info};

use crate::engine::CorpusIndex;
use crate::types::SearchHit;

/// Build state reported by [`IndexHandle::status`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum IndexStatus {
    Building,
    Ready,
    Failed(String),
}

/// Publish-once slot for a built [`CorpusIndex`]
///
/// Searches fail with `NotBuilt` until [`publish`](Self::publish) runs.
/// After that the index is read-only and shared without locking.
#[derive(Debug, Default)]
pub struct IndexHandle {
    index: OnceLock<Arc<CorpusIndex>>,
    failure: OnceLock<String>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that is ready immediately
    pub fn ready(index: CorpusIndex) -> Self {
        let handle = Self::new();
        // A fresh handle is always empty
        let _ = handle.index.set(Arc::new(index));
        handle
    }

    /// Publish a built index; a second publish is rejected
    pub fn publish(&self, index: CorpusIndex) -> Result<Arc<CorpusIndex>> {
        let index = Arc::new(index);
        self.index
            .set(Arc::clone(&index))
            .map_err(|_| SkillCompassError::internal("search index already published"))?;

        info!("Search index published - {} questions", index.len());
        Ok(index)
    }

    /// Record that building failed; searches keep returning `NotBuilt`
    pub fn mark_failed(&self, err: &SkillCompassError) {
        error!("Search index build failed: {}", err);
        let _ = self.failure.set(err.to_string());
    }

    /// The published index
    pub fn get(&self) -> Result<Arc<CorpusIndex>> {
        self.index
            .get()
            .cloned()
            .ok_or(SkillCompassError::NotBuilt)
    }

    pub fn is_ready(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn status(&self) -> IndexStatus {
        if self.is_ready() {
            IndexStatus::Ready
        } else if let Some(reason) = self.failure.get() {
            IndexStatus::Failed(reason.clone())
        } else {
            IndexStatus::Building
        }
    }

    /// Texts of the `k` nearest questions, or `NotBuilt`
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<String>> {
        self.get()?.search(query, k)
    }

    /// Scored lookup, or `NotBuilt`
    pub fn search_hits(&self, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        self.get()?.search_hits(query, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn index() -> CorpusIndex {
        CorpusIndex::build(["What is Docker?", "Explain Kubernetes pods"]).unwrap()
    }

    #[test]
    fn test_search_before_publish() {
        let handle = IndexHandle::new();
        assert_eq!(handle.status(), IndexStatus::Building);
        assert!(matches!(
            handle.search("docker", 1),
            Err(SkillCompassError::NotBuilt)
        ));
    }

    #[test]
    fn test_publish_then_search() {
        let handle = IndexHandle::new();
        handle.publish(index()).unwrap();

        assert_eq!(handle.status(), IndexStatus::Ready);
        assert_eq!(handle.search("docker", 1).unwrap(), vec!["What is Docker?"]);
    }

    #[test]
    fn test_second_publish_rejected() {
        let handle = IndexHandle::ready(index());
        assert!(handle.publish(index()).is_err());
        assert_eq!(handle.get().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_build() {
        let handle = IndexHandle::new();
        handle.mark_failed(&SkillCompassError::EmptyCorpus);

        assert!(matches!(handle.status(), IndexStatus::Failed(_)));
        assert!(matches!(
            handle.search("docker", 1),
            Err(SkillCompassError::NotBuilt)
        ));
    }

    #[test]
    fn test_concurrent_searches() {
        let handle = Arc::new(IndexHandle::ready(index()));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || handle.search("kubernetes pods", 2).unwrap())
            })
            .collect();

        for worker in workers {
            let results = worker.join().unwrap();
            assert_eq!(results[0], "Explain Kubernetes pods");
        }
    }
}
