//! Aggregations over a country selection. Every function here is a fresh, pure computation.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::dataset::CountryDataset;

/// Number of words shown in the word-flow diagram.
pub const DEFAULT_TOP_N: usize = 20;

/// Added to the reporter score to get a marker size that is never zero.
pub const MARKER_OFFSET: i32 = 2;

/// One point of the sentiment scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPoint {
    pub country: String,
    pub q_num: String,
    pub sentiment: i32,
    pub marker_size: i32,
}

/// Sentiment statistics of one selected dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySentiment {
    pub country: String,
    pub records: usize,
    pub mean: f64,
    pub min: i32,
    pub max: i32,
}

/// Average cleaned-text length of one (country, score) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGroup {
    pub score: i32,
    pub country: String,
    pub avg_word_count: f64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

/// Number of a country's records whose cleaned text matches `word`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordOccurrence {
    pub country: String,
    pub word: String,
    pub records: u32,
}

/// How a word is matched against a record's cleaned text when counting occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Substring containment. Over-counts words embedded in longer ones
    /// (`land` matches a record that only says `wetland`).
    #[default]
    Substring,
    /// Exact token match.
    Token,
}

impl MatchMode {
    pub fn matches(self, clean_text: &str, word: &str) -> bool {
        match self {
            MatchMode::Substring => clean_text.contains(word),
            MatchMode::Token => clean_text.split_whitespace().any(|t| t == word),
        }
    }
}

/// Scatter points for every selected record, in selection then file order.
pub fn sentiment_points(selection: &[&CountryDataset]) -> Vec<SentimentPoint> {
    selection
        .iter()
        .flat_map(|d| d.records.iter())
        .map(|r| SentimentPoint {
            country: r.country.clone(),
            q_num: r.q_num.clone(),
            sentiment: r.sentiment,
            marker_size: r.score + MARKER_OFFSET,
        })
        .collect()
}

/// Per-dataset sentiment statistics, in selection order. Empty datasets report zeros.
pub fn sentiment_summary(selection: &[&CountryDataset]) -> Vec<CountrySentiment> {
    selection
        .iter()
        .map(|d| {
            let scores: Vec<i32> = d.records.iter().map(|r| r.sentiment).collect();
            let mean = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<i32>() as f64 / scores.len() as f64
            };
            CountrySentiment {
                country: d.name.clone(),
                records: scores.len(),
                mean,
                min: scores.iter().min().copied().unwrap_or_default(),
                max: scores.iter().max().copied().unwrap_or_default(),
            }
        })
        .collect()
}

/// Mean cleaned-text word count per (country, score), sorted by score then country.
pub fn average_word_count_by_score(selection: &[&CountryDataset]) -> Vec<ScoreGroup> {
    let mut groups: BTreeMap<(i32, &str), (usize, usize)> = BTreeMap::new();
    for r in selection.iter().flat_map(|d| d.records.iter()) {
        let entry = groups.entry((r.score, r.country.as_str())).or_insert((0, 0));
        entry.0 += r.word_count();
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|((score, country), (words, records))| ScoreGroup {
            score,
            country: country.to_string(),
            avg_word_count: words as f64 / records as f64,
            records,
        })
        .collect()
}

/// Occurrences of each word in `words`.
/// # Example
/// ```
/// use survey_sentiment::count_words;
/// let counted = count_words(["one", "two", "two"]);
/// assert_eq!(counted["two"], 2);
/// assert_eq!(counted["one"], 1);
/// ```
pub fn count_words<I, S>(words: I) -> HashMap<String, u32>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut frequency: HashMap<String, u32> = HashMap::new();
    for word in words {
        *frequency.entry(word.as_ref().to_owned()).or_insert(0) += 1;
    }
    frequency
}

/// The `n` most frequent words of `tokens`, most frequent first.
/// Equal counts keep the order in which the words were first seen.
pub fn most_common<'a, I>(tokens: I, n: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens.into_iter().collect();
    let counts = count_words(&tokens);
    // each word once, in first-seen order; the stable sort keeps it for ties
    let mut seen = HashSet::with_capacity(counts.len());
    let mut ranked: Vec<(&str, u32)> = tokens
        .iter()
        .filter(|t| seen.insert(**t))
        .map(|t| (*t, counts[*t]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Top `n` words across the cleaned text of every selected record.
pub fn top_words(selection: &[&CountryDataset], n: usize) -> Vec<WordCount> {
    let tokens = selection
        .iter()
        .flat_map(|d| d.records.iter())
        .flat_map(|r| r.clean_text.split_whitespace());
    most_common(tokens, n)
}

/// For each selected country and each word, how many of the country's records match it.
/// Rows are grouped by country, words in the given order.
pub fn word_occurrences(
    selection: &[&CountryDataset],
    words: &[WordCount],
    mode: MatchMode,
) -> Vec<WordOccurrence> {
    let mut out = Vec::with_capacity(selection.len() * words.len());
    for dataset in selection {
        for w in words {
            let records = dataset
                .records
                .iter()
                .filter(|r| mode.matches(&r.clean_text, &w.word))
                .count() as u32;
            out.push(WordOccurrence {
                country: dataset.name.clone(),
                word: w.word.clone(),
                records,
            });
        }
    }
    out
}
