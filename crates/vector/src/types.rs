use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question in the indexed corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 0-based position in the corpus
    pub index: usize,

    /// Question text
    pub question: String,

    /// Skill domain (e.g. "Web Development")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Difficulty level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,

    /// Multiple-choice answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnswerOptions>,

    /// Badge awarded for the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Multiple-choice answers a to d (the correct answer is never carried)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

impl AnswerOptions {
    /// `None` when no option is present
    pub fn from_parts(
        a: Option<String>,
        b: Option<String>,
        c: Option<String>,
        d: Option<String>,
    ) -> Option<Self> {
        if a.is_none() && b.is_none() && c.is_none() && d.is_none() {
            return None;
        }
        Some(Self { a, b, c, d })
    }
}

impl QuestionRecord {
    pub fn new(index: usize, question: impl Into<String>) -> Self {
        Self {
            index,
            question: question.into(),
            domain: None,
            difficulty: None,
            options: None,
            badge: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }

    pub fn with_options(mut self, options: AnswerOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }
}

/// Search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Rank position, 0 = nearest
    pub rank: usize,

    /// Cosine distance to the query (0.0 to 1.0 for TF-IDF vectors)
    pub distance: f32,

    /// Cosine similarity (`1 - distance`)
    pub score: f32,

    /// Matched question
    pub record: QuestionRecord,
}

/// Index statistics
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Number of indexed questions
    pub documents: usize,

    /// Number of distinct terms
    pub vocabulary_size: usize,

    /// Hex SHA-256 of the corpus texts
    pub fingerprint: String,

    /// Timestamp when the index was built
    pub built_at: DateTime<Utc>,
}
