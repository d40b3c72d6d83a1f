//! Loading per-country survey CSVs into cleaned, scored records.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;
use whatlang::Lang;

use crate::error::{Error, Result};
use crate::normalize::Normalizer;
use crate::sentiment::Lexicon;

/// Columns every survey file must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = ["text", "country", "q_num", "score"];

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    text: String,
    country: String,
    q_num: String,
    score: i32,
}

/// One survey response with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub text: String,
    pub country: String,
    pub q_num: String,
    /// Score the reporter assigned to the answer.
    pub score: i32,
    pub clean_text: String,
    pub sentiment: i32,
}

impl Record {
    /// Number of tokens in the cleaned text.
    pub fn word_count(&self) -> usize {
        self.clean_text.split_whitespace().count()
    }
}

/// Normalizer and scorer applied to every record on load.
#[derive(Debug, Clone, Default)]
pub struct TextPipeline {
    pub normalizer: Normalizer,
    pub lexicon: Lexicon,
}

impl TextPipeline {
    pub fn new(normalizer: Normalizer, lexicon: Lexicon) -> Self {
        Self { normalizer, lexicon }
    }

    /// Builds a record from raw fields, deriving cleaned text and sentiment.
    pub fn record(
        &self,
        text: impl Into<String>,
        country: impl Into<String>,
        q_num: impl Into<String>,
        score: i32,
    ) -> Record {
        let text = text.into();
        let clean_text = self.normalizer.clean(&text);
        let sentiment = self.lexicon.score(&clean_text);
        Record {
            text,
            country: country.into(),
            q_num: q_num.into(),
            score,
            clean_text,
            sentiment,
        }
    }
}

/// All records of one country, in file order.
#[derive(Debug, Clone)]
pub struct CountryDataset {
    /// Country identifier (the file stem, e.g. `SouthAfrica`).
    pub name: String,
    pub records: Vec<Record>,
    /// Language detected on the combined raw text, if any.
    pub language: Option<Lang>,
}

impl CountryDataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        let language = detect_language(&records);
        Self {
            name: name.into(),
            records,
            language,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn detect_language(records: &[Record]) -> Option<Lang> {
    let joined = records
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    whatlang::detect(&joined)
        .filter(|info| info.is_reliable())
        .map(|info| info.lang())
}

/// Parses survey rows from `reader`. `origin` is only used in error messages.
pub fn read_records<R: Read>(
    reader: R,
    origin: &Path,
    pipeline: &TextPipeline,
) -> Result<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| Error::csv(origin, e))?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn {
                path: origin.to_path_buf(),
                column,
            });
        }
    }

    let rows = rdr
        .deserialize::<Row>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::csv(origin, e))?;

    Ok(rows
        .into_par_iter()
        .map(|row| pipeline.record(row.text, row.country, row.q_num, row.score))
        .collect())
}

/// Loads one country file. The file stem becomes the country identifier.
pub fn load_country(path: &Path, pipeline: &TextPipeline) -> Result<CountryDataset> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let records = read_records(file, path, pipeline)?;
    let name = country_id(path);
    let dataset = CountryDataset::new(name, records);
    match dataset.language {
        Some(Lang::Eng) | None => {}
        Some(other) => warn!(
            "{}: text looks like {} but the sentiment lexicon is English",
            dataset.name,
            other.eng_name()
        ),
    }
    debug!("Loaded {} records for {}", dataset.len(), dataset.name);
    Ok(dataset)
}

fn country_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Lists `*.csv` files directly inside `dir` (or `dir` itself if it is a CSV file),
/// sorted by file name.
pub fn collect_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::io(dir, e.into()))?;
        let p = entry.path();
        if entry.file_type().is_file()
            && p.extension()
                .map(|x| x.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        {
            files.push(p.to_path_buf());
        }
    }
    Ok(files)
}

/// Country identifier to dataset mapping, ordered by identifier.
#[derive(Debug, Clone, Default)]
pub struct CountryMap {
    datasets: BTreeMap<String, CountryDataset>,
}

impl CountryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every CSV in `dir`. With `only`, loads just those countries and fails if one
    /// of them has no file.
    pub fn load_dir(dir: &Path, pipeline: &TextPipeline, only: Option<&[String]>) -> Result<Self> {
        let files = collect_csv_files(dir)?;
        let mut map = Self::new();
        for file in files {
            let id = country_id(&file);
            if let Some(wanted) = only {
                if !wanted.iter().any(|w| *w == id) {
                    continue;
                }
            }
            map.insert(load_country(&file, pipeline)?);
        }
        if let Some(wanted) = only {
            if let Some(missing) = wanted.iter().find(|w| !map.datasets.contains_key(*w)) {
                return Err(Error::MissingCountry(missing.clone()));
            }
        }
        info!("Loaded {} countries from {}", map.len(), dir.display());
        Ok(map)
    }

    /// Inserts a dataset, replacing any previous one with the same name.
    pub fn insert(&mut self, dataset: CountryDataset) {
        self.datasets.insert(dataset.name.clone(), dataset);
    }

    pub fn get(&self, name: &str) -> Option<&CountryDataset> {
        self.datasets.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.datasets.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Resolves a selection to datasets, in selection order. Repeated names are kept once.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&CountryDataset>> {
        let mut selected: Vec<&CountryDataset> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let dataset = self.get(name).ok_or_else(|| Error::UnknownCountry {
                name: name.to_string(),
                known: self.names(),
            })?;
            if !selected.iter().any(|d| d.name == dataset.name) {
                selected.push(dataset);
            }
        }
        Ok(selected)
    }
}
