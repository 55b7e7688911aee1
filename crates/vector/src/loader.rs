//! Question corpus loading
//!
//! Reads a CSV file with a header row. The question column is required;
//! `domain`, `difficulty_level`, `option_a`..`option_d` and `badge` columns
//! are picked up when present. `correct_answer` is never read.

use skillcompass_common::{Result, SkillCompassError};
use std::path::Path;
use tracing::{info, warn};

use crate::types::{AnswerOptions, QuestionRecord};

const DOMAIN_COLUMN: &str = "domain";
const DIFFICULTY_COLUMN: &str = "difficulty_level";
const OPTION_COLUMNS: [&str; 4] = ["option_a", "option_b", "option_c", "option_d"];
const BADGE_COLUMN: &str = "badge";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding a corpus file was decoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8, with an optional byte order mark
    Utf8,
    /// ISO-8859-1 (Latin-1) fallback
    Latin1,
}

/// Load questions from a CSV file
///
/// Decodes as UTF-8 first and falls back to ISO-8859-1 when the bytes are
/// not valid UTF-8. Rows with a blank question are skipped. An empty result
/// is returned as-is; building an index from it fails with `EmptyCorpus`.
pub fn load_questions(path: &Path, column: &str) -> Result<Vec<QuestionRecord>> {
    let bytes = std::fs::read(path).map_err(|e| {
        SkillCompassError::corpus_load(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let (text, encoding) = decode(&bytes);
    if encoding == SourceEncoding::Latin1 {
        warn!(
            "{} is not valid UTF-8, decoded as ISO-8859-1",
            path.display()
        );
    }

    let records = parse_questions(&text, column).map_err(|e| match e {
        SkillCompassError::CorpusLoad(msg) => {
            SkillCompassError::corpus_load(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    info!(
        "Loaded {} questions from {} ({:?})",
        records.len(),
        path.display(),
        encoding
    );
    Ok(records)
}

/// Decode raw bytes, UTF-8 first and ISO-8859-1 second
pub fn decode(bytes: &[u8]) -> (String, SourceEncoding) {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => (text.to_string(), SourceEncoding::Utf8),
        // Latin-1 maps every byte to the code point of the same value
        Err(_) => (
            body.iter().map(|&b| char::from(b)).collect(),
            SourceEncoding::Latin1,
        ),
    }
}

/// Parse CSV text into question records
pub fn parse_questions(text: &str, column: &str) -> Result<Vec<QuestionRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SkillCompassError::corpus_load(format!("invalid header row: {}", e)))?
        .clone();

    let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let question_idx = position(column).ok_or_else(|| {
        SkillCompassError::corpus_load(format!("missing column '{}'", column))
    })?;
    let domain_idx = position(DOMAIN_COLUMN);
    let difficulty_idx = position(DIFFICULTY_COLUMN);
    let option_idx = OPTION_COLUMNS.map(position);
    let badge_idx = position(BADGE_COLUMN);

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            SkillCompassError::corpus_load(format!("malformed row {}: {}", line + 1, e))
        })?;

        let question = row.get(question_idx).unwrap_or("").trim();
        if question.is_empty() {
            continue;
        }

        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let [a, b, c, d] = option_idx.map(optional);

        records.push(QuestionRecord {
            index: records.len(),
            question: question.to_string(),
            domain: optional(domain_idx),
            difficulty: optional(difficulty_idx),
            options: AnswerOptions::from_parts(a, b, c, d),
            badge: optional(badge_idx),
        });
    }

    Ok(records)
}
