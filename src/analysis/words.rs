use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::errors::{DashboardError, Result};
use crate::types::WordFrequency;

// Anything that is neither a word character nor whitespace
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "doing",
        "down", "during", "each", "else", "ever", "few", "for", "from", "further", "get", "had",
        "has", "have", "having", "he", "her", "here", "hers", "herself", "him", "himself",
        "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
        "me", "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
        "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over",
        "own", "same", "shall", "she", "should", "since", "so", "some", "such", "than", "that",
        "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
        "were", "what", "when", "where", "which", "while", "who", "whom", "why", "with",
        "would", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Strip every character that is not a word character or whitespace.
pub fn normalize_text(text: &str) -> String {
    NON_WORD.replace_all(text, "").into_owned()
}

/// Normalize each present title and join them with single spaces.
pub fn normalize_titles<I, S>(titles: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    titles
        .into_iter()
        .flatten()
        .map(|title| normalize_text(title.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count words in a normalized blob the way the word-cloud renderer does,
/// keeping at most `max_words`.
///
/// Tokens shorter than two characters and common English stopwords are
/// ignored, and case variants are merged under their most frequent spelling.
/// Fails when the blob yields no words at all.
pub fn word_frequencies(blob: &str, max_words: usize) -> Result<Vec<WordFrequency>> {
    if blob.split_whitespace().next().is_none() {
        return Err(DashboardError::InsufficientWords { found: 0 });
    }

    // lowercase -> (spelling -> count)
    let mut spellings: HashMap<String, HashMap<&str, usize>> = HashMap::new();
    for token in blob.split_whitespace() {
        if token.chars().count() < 2 {
            continue;
        }
        let folded = token.to_lowercase();
        if STOPWORDS.contains(folded.as_str()) {
            continue;
        }
        *spellings.entry(folded).or_default().entry(token).or_insert(0) += 1;
    }

    if spellings.is_empty() {
        return Err(DashboardError::InsufficientWords { found: 0 });
    }

    let mut words: Vec<WordFrequency> = spellings
        .into_values()
        .map(|variants| {
            let count = variants.values().sum();
            let word = variants
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
                .map(|(spelling, _)| spelling.to_string())
                .unwrap_or_default();
            WordFrequency { word, count }
        })
        .collect();

    words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    words.truncate(max_words);
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize_text("Don't Stop... Me-Now!"), "Dont Stop MeNow");
        assert_eq!(normalize_text("Canción (Remix)"), "Canción Remix");
    }

    #[test]
    fn test_normalize_titles_drops_missing() {
        let titles = vec![Some("Hello, World"), None, Some("Ok?")];
        assert_eq!(normalize_titles(titles), "Hello World Ok");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let titles = vec![Some("Rock & Roll!"), Some("  spaced  out "), Some("(What's) this?")];
        let once = normalize_titles(titles);
        let twice = normalize_titles(vec![Some(once.as_str())]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_word_frequencies_counts_and_orders() {
        let result = word_frequencies("Test Test Song", 50).unwrap();
        assert_eq!(
            result,
            vec![
                WordFrequency { word: "Test".to_string(), count: 2 },
                WordFrequency { word: "Song".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_word_frequencies_merges_case_variants() {
        let result = word_frequencies("love Love Love", 50).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].word, "Love");
        assert_eq!(result[0].count, 3);
    }

    #[test]
    fn test_word_frequencies_respects_cap() {
        let blob: String = (0..80).map(|i| format!("word{} ", i)).collect();
        let result = word_frequencies(&blob, 50).unwrap();
        assert_eq!(result.len(), 50);
    }

    #[test]
    fn test_punctuation_only_input_fails() {
        let blob = normalize_titles(vec![Some("!!!"), Some("..."), Some("?")]);
        let err = word_frequencies(&blob, 50).unwrap_err();
        assert!(matches!(err, DashboardError::InsufficientWords { found: 0 }));
        assert_eq!(err.to_string(), "We need at least 1 word to plot a word cloud, got 0.");
    }

    #[test]
    fn test_only_stopwords_fails() {
        assert!(word_frequencies("the a of I", 50).is_err());
    }
}
