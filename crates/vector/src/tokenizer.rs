/// Minimum number of characters a term must have
pub const MIN_TERM_CHARS: usize = 2;

/// Split text into normalized terms
///
/// Lower-cases the text, splits on every character that is neither
/// alphanumeric nor `_`, and drops terms shorter than [`MIN_TERM_CHARS`].
/// Corpus documents and queries go through this same function.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_term_char(c))
        .filter(|term| term.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_string)
        .collect()
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        let terms = tokenize("What is the difference between HTTP and HTTPS?");
        assert_eq!(
            terms,
            vec!["what", "is", "the", "difference", "between", "http", "and", "https"]
        );
    }

    #[test]
    fn test_hyphen_splits_terms() {
        let terms = tokenize("object-oriented programming.");
        assert_eq!(terms, vec!["object", "oriented", "programming"]);
    }

    #[test]
    fn test_single_char_terms_dropped() {
        assert_eq!(tokenize("a b c++ c# go"), vec!["go"]);
    }

    #[test]
    fn test_underscore_and_digits_kept() {
        assert_eq!(tokenize("__init__ ipv6 42"), vec!["__init__", "ipv6", "42"]);
    }

    #[test]
    fn test_unicode_terms() {
        assert_eq!(tokenize("Café RÉSUMÉ"), vec!["café", "résumé"]);
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ?! ").is_empty());
    }
}
