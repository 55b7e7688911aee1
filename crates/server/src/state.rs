use skillcompass_common::{AppConfig, Result};
use skillcompass_vector::{load_questions, CorpusIndex, IndexHandle};
use std::sync::Arc;
use tracing::info;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Question search index, published once the corpus is built
    pub index: Arc<IndexHandle>,
}

impl AppState {
    /// Create state with an index that is still being built
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            index: Arc::new(IndexHandle::new()),
        }
    }

    /// Create state around an already built index
    pub fn with_index(config: AppConfig, index: CorpusIndex) -> Self {
        Self {
            config,
            index: Arc::new(IndexHandle::ready(index)),
        }
    }

    /// Build the corpus index on the blocking pool and publish it
    ///
    /// Failures are recorded on the handle so `/api/health` can report them.
    pub async fn build_index(&self) -> Result<()> {
        let config = self.config.clone();
        let built = tokio::task::spawn_blocking(move || load_corpus_index(&config))
            .await
            .map_err(|e| anyhow::anyhow!("index build task panicked: {}", e))?;

        match built {
            Ok(index) => {
                self.index.publish(index)?;
                Ok(())
            }
            Err(e) => {
                self.index.mark_failed(&e);
                Err(e)
            }
        }
    }
}

/// Load the configured corpus file and build its index
pub fn load_corpus_index(config: &AppConfig) -> Result<CorpusIndex> {
    info!(
        "Building search index from {} (column '{}')",
        config.corpus_path.display(),
        config.question_column
    );
    let records = load_questions(&config.corpus_path, &config.question_column)?;
    CorpusIndex::build_from_records(records)
}
