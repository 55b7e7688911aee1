use serde::{Deserialize, Serialize};
use skillcompass_vector::{IndexStats, IndexStatus, QuestionRecord, SearchHit};

/// Search query
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search query text
    pub q: Option<String>,

    /// Number of results (defaults to the configured top-k)
    pub k: Option<usize>,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<SearchResultItem>,
    pub query: String,
    pub count: usize,
}

/// One ranked question
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub index: usize,
    pub question: String,
    pub domain: Option<String>,
    pub difficulty: Option<String>,
    pub distance: f32,
    pub score: f32,
}

impl From<SearchHit> for SearchResultItem {
    fn from(hit: SearchHit) -> Self {
        Self {
            index: hit.record.index,
            question: hit.record.question,
            domain: hit.record.domain,
            difficulty: hit.record.difficulty,
            distance: hit.distance,
            score: hit.score,
        }
    }
}

/// Domain list response
#[derive(Debug, Serialize)]
pub struct DomainsResponse {
    pub success: bool,
    pub data: Vec<String>,
}

/// Questions of a single domain
#[derive(Debug, Serialize)]
pub struct DomainQuestionsResponse {
    pub success: bool,
    pub domain: String,
    pub data: Vec<QuestionRecord>,
}

/// Index statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: IndexStats,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub index: IndexStatus,
}

/// Error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}
