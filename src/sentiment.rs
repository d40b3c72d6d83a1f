//! Lexicon-based sentiment scoring of cleaned text.
//!
//! A [`Lexicon`] maps words (and a few multi-word phrases) to integer polarity values in the
//! AFINN style: `-5` (very negative) to `+5` (very positive). The score of a text is the sum of
//! the values of every entry found in it; unknown words contribute nothing.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::RangeInclusive;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Polarity values an AFINN file may carry.
pub const AFINN_RANGE: RangeInclusive<i32> = -5..=5;

/// Built-in English polarity entries (a subset of AFINN-165).
const ENGLISH_LEXICON: &[(&str, i32)] = &[
    ("abandon", -2), ("abandoned", -2), ("abuse", -3), ("abused", -3), ("accept", 1),
    ("accepted", 1), ("accomplish", 2), ("accomplished", 2), ("achievement", 2),
    ("active", 1), ("adequate", 1), ("admire", 3), ("adopt", 1), ("adopted", 1),
    ("advantage", 2), ("adverse", -2), ("affected", -1), ("afraid", -2), ("aggressive", -2),
    ("agree", 1), ("agreed", 1), ("agreement", 1), ("alarm", -2), ("alarmed", -2),
    ("amazing", 4), ("anger", -3), ("angry", -3), ("anxious", -2), ("appreciate", 2),
    ("appreciated", 2), ("approval", 2), ("approved", 2), ("awesome", 4), ("awful", -3),
    ("bad", -3), ("benefit", 2), ("benefits", 2), ("best", 3), ("better", 2), ("blame", -2),
    ("boost", 1), ("burden", -2), ("care", 2), ("careful", 2), ("chaos", -2),
    ("challenge", -1), ("challenges", -1), ("clean", 2), ("clear", 1), ("collapse", -2),
    ("commit", 1), ("committed", 1), ("concerned", -2), ("conflict", -2), ("confused", -2),
    ("cool stuff", 3), ("crisis", -3), ("critical", -2), ("damage", -3), ("damaged", -3),
    ("danger", -2), ("dangerous", -2), ("destroy", -3), ("destroyed", -3),
    ("destruction", -3), ("difficult", -1), ("disappointed", -2), ("disaster", -2),
    ("effective", 2), ("effectively", 2), ("efficient", 2), ("encourage", 2),
    ("encouraged", 2), ("excellent", 3), ("excited", 3), ("fail", -2), ("failed", -2),
    ("failure", -2), ("fantastic", 4), ("fear", -2), ("fine", 2), ("fraud", -4), ("free", 1),
    ("good", 3), ("great", 3), ("green wash", -3), ("green washing", -3), ("growth", 2),
    ("happy", 3), ("harm", -2), ("harmed", -2), ("hate", -3), ("healthy", 2), ("help", 2),
    ("helpful", 2), ("hope", 2), ("hopeful", 2), ("ignore", -1), ("ignored", -2),
    ("illegal", -3), ("importance", 2), ("important", 2), ("improve", 2), ("improved", 2),
    ("improvement", 2), ("inadequate", -2), ("interest", 1), ("interested", 2), ("kill", -3),
    ("killed", -3), ("lack", -2), ("loss", -3), ("losses", -3), ("lost", -3), ("love", 3),
    ("negative", -2), ("nice", 3), ("no fun", -3), ("opportunity", 2), ("outstanding", 5),
    ("pollute", -2), ("polluted", -2), ("pollution", -2), ("poor", -2), ("positive", 2),
    ("problem", -2), ("problems", -2), ("progress", 2), ("protect", 1), ("protected", 1),
    ("protects", 1), ("risk", -2), ("risks", -2), ("sad", -2), ("safe", 1), ("strong", 2),
    ("stronger", 2), ("success", 2), ("successful", 3), ("support", 2), ("supported", 2),
    ("supports", 2), ("terrible", -3), ("threat", -2), ("threatened", -2), ("threats", -2),
    ("ugly", -3), ("win", 4), ("wonderful", 4), ("worried", -3), ("worry", -3), ("worse", -3),
    ("worst", -3), ("wrong", -2),
];

/// Word and phrase polarity table.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, i32>,
    /// Longest entry measured in tokens.
    max_phrase_len: usize,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    /// Builds a lexicon from `(entry, value)` pairs. Entries are lowercased and their
    /// whitespace normalized to single spaces.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        let mut max_phrase_len = 1;
        for (entry, value) in entries {
            let key = entry
                .as_ref()
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>();
            if key.is_empty() {
                continue;
            }
            max_phrase_len = max_phrase_len.max(key.len());
            map.insert(key.join(" "), value);
        }
        Self {
            entries: map,
            max_phrase_len,
        }
    }

    /// The built-in English lexicon.
    pub fn english() -> Self {
        Self::new(ENGLISH_LEXICON.iter().copied())
    }

    /// Reads an AFINN-format lexicon: one `entry<TAB>value` per line.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let lexicon = Self::from_reader(BufReader::new(file))?;
        debug!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| Error::Lexicon {
                line: line_no,
                message: e.to_string(),
            })?;
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            let (entry, value) = line
                .rsplit_once('\t')
                .or_else(|| line.rsplit_once(' '))
                .ok_or_else(|| Error::Lexicon {
                    line: line_no,
                    message: format!("expected '<entry>\\t<value>', got {line:?}"),
                })?;
            let value: i32 = value.trim().parse().map_err(|_| Error::Lexicon {
                line: line_no,
                message: format!("invalid value {:?}", value.trim()),
            })?;
            if !AFINN_RANGE.contains(&value) {
                return Err(Error::Lexicon {
                    line: line_no,
                    message: format!("value {value} outside -5..=5"),
                });
            }
            entries.push((entry.to_string(), value));
        }
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Polarity of a single entry, if present.
    pub fn value(&self, entry: &str) -> Option<i32> {
        self.entries.get(entry).copied()
    }

    /// Sentiment score of cleaned text.
    ///
    /// Phrases are matched on consecutive tokens, longest first, without overlap.
    ///
    /// ```
    /// use survey_sentiment::Lexicon;
    /// let lex = Lexicon::english();
    /// assert_eq!(lex.score("great"), 3);
    /// assert_eq!(lex.score("great wetland damaged"), 0);
    /// assert_eq!(lex.score(""), 0);
    /// ```
    pub fn score(&self, cleaned: &str) -> i32 {
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let mut total: i32 = 0;
        let mut i = 0;
        'outer: while i < tokens.len() {
            let longest = self.max_phrase_len.min(tokens.len() - i);
            for len in (2..=longest).rev() {
                let phrase = tokens[i..i + len].join(" ");
                if let Some(v) = self.entries.get(&phrase) {
                    total = total.saturating_add(*v);
                    i += len;
                    continue 'outer;
                }
            }
            total = total.saturating_add(self.entries.get(tokens[i]).copied().unwrap_or(0));
            i += 1;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn single_words_sum() {
        let lex = Lexicon::english();
        assert_eq!(lex.score("great"), 3);
        assert_eq!(lex.score("bad"), -3);
        assert_eq!(lex.score("great great bad wetland"), 3);
    }

    #[test]
    fn unknown_words_are_neutral() {
        let lex = Lexicon::english();
        assert_eq!(lex.score("ramsar wetland convention"), 0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let lex = Lexicon::english();
        let text = "pollution threatened protected site success";
        let first = lex.score(text);
        for _ in 0..10 {
            assert_eq!(lex.score(text), first);
        }
        assert_eq!(first, -2 - 2 + 1 + 2);
    }

    #[test]
    fn phrases_take_precedence_over_words() {
        let lex = Lexicon::new([("green", 1), ("wash", 0), ("green wash", -3), ("good", 3)]);
        assert_eq!(lex.score("green wash"), -3);
        assert_eq!(lex.score("green good"), 4);
        assert_eq!(lex.score("good green wash green"), 3 - 3 + 1);
    }

    #[test]
    fn reads_afinn_format() {
        let data = "abandon\t-2\ncool stuff\t3\n\nzealous\t2\n";
        let lex = Lexicon::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.value("cool stuff"), Some(3));
        assert_eq!(lex.score("some cool stuff abandon"), 1);
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = Lexicon::from_reader(Cursor::new("good\t3\nbad\tvery\n")).unwrap_err();
        match err {
            Error::Lexicon { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(Lexicon::from_reader(Cursor::new("lonely\n")).is_err());
    }

    #[test]
    fn rejects_values_outside_afinn_range() {
        let err = Lexicon::from_reader(Cursor::new("good\t2147483647\n")).unwrap_err();
        assert!(matches!(err, Error::Lexicon { line: 1, .. }));
        assert!(Lexicon::from_reader(Cursor::new("meh\t-6\n")).is_err());
        assert!(Lexicon::from_reader(Cursor::new("outstanding\t5\nawful\t-5\n")).is_ok());
    }

    #[test]
    fn extreme_values_saturate_instead_of_overflowing() {
        let lex = Lexicon::new([("good", i32::MAX), ("bad", i32::MIN)]);
        assert_eq!(lex.score("good good"), i32::MAX);
        assert_eq!(lex.score("bad bad"), i32::MIN);
    }

    #[test]
    fn longest_of_overlapping_phrases_wins() {
        let lex = Lexicon::new([
            ("not", -1),
            ("good", 3),
            ("not good", -2),
            ("not good enough", -4),
            ("good enough", 2),
        ]);
        assert_eq!(lex.score("not good enough"), -4);
        assert_eq!(lex.score("not good"), -2);
        // "not good" is taken first, leaving "enough" on its own
        assert_eq!(lex.score("not good not good enough"), -2 - 4);
        assert_eq!(lex.score("good enough not"), 2 - 1);
    }
}
