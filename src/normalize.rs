//! Text normalization: punctuation stripping, alphabetic filtering, stopword removal.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Characters removed from every token before it is checked.
pub const PUNCTUATION: &[char] = &[
    '!', '(', ')', '-', '[', ']', '{', '}', ';', ':', ',', '+', '\'', '"', '\\', '<', '>', '.',
    '/', '?', '@', '#', '$', '%', '^', '&', '*', '_', '~', 'Ã', '‚',
];

/// Built-in English stopword list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Removes every [`PUNCTUATION`] character from `token`.
///
/// ```
/// use survey_sentiment::strip_punctuation;
/// assert_eq!(strip_punctuation("(wet-land)!"), "wetland");
/// ```
pub fn strip_punctuation(token: &str) -> String {
    token.replace(PUNCTUATION, "")
}

/// Reads a stopword file: one word per line, blank lines and `#` comments ignored.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_stopwords(&content))
}

fn parse_stopwords(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Turns raw survey text into cleaned text.
///
/// Cleaned text holds only lowercase alphabetic tokens, none of them a stopword,
/// joined by single spaces.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    pub fn new(stopwords: HashSet<String>) -> Self {
        Self { stopwords }
    }

    /// Normalizer using [`ENGLISH_STOPWORDS`].
    pub fn english() -> Self {
        Self::new(ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect())
    }

    /// Adds `words` (lowercased) to the stopword set.
    pub fn with_extra_stopwords<I>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.to_lowercase()));
        self
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Cleans one raw text record. Never fails; the result may be empty.
    ///
    /// ```
    /// use survey_sentiment::Normalizer;
    /// let n = Normalizer::english();
    /// assert_eq!(n.clean("This is GREAT!!"), "great");
    /// assert_eq!(n.clean("Wetlands, 2019: restored (partially)."), "wetlands restored partially");
    /// ```
    pub fn clean(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for token in raw.split_whitespace() {
            let word = strip_punctuation(token).to_lowercase();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            if self.is_stopword(&word) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&word);
        }
        out
    }
}
