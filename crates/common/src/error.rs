/// SkillCompass error types
#[derive(Debug, thiserror::Error)]
pub enum SkillCompassError {
    /// No documents to index
    #[error("Corpus is empty: at least one question is required to build an index")]
    EmptyCorpus,

    /// Corpus source unreadable or undecodable
    #[error("Corpus load error: {0}")]
    CorpusLoad(String),

    /// Search attempted before an index was published
    #[error("Search index is not built yet")]
    NotBuilt,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkillCompassError {
    /// Create corpus load error
    pub fn corpus_load<S: Into<String>>(msg: S) -> Self {
        Self::CorpusLoad(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

// HTTP response mapping
impl SkillCompassError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::NotBuilt => 503,
            Self::EmptyCorpus => 500,
            Self::CorpusLoad(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Json(_) => 400,
            Self::Csv(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
