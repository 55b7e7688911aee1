//! SkillCompass question search engine
//!
//! TF-IDF 벡터 공간 위에서 코사인 거리 기반 최근접 이웃 검색

pub mod engine;
pub mod handle;
pub mod loader;
pub mod neighbors;
pub mod sparse;
pub mod tfidf;
pub mod tokenizer;
pub mod types;

pub use engine::CorpusIndex;
pub use handle::{IndexHandle, IndexStatus};
pub use loader::{load_questions, SourceEncoding};
pub use types::{AnswerOptions, IndexStats, QuestionRecord, SearchHit};
