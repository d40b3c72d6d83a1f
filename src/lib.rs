#![forbid(unsafe_code)]
//! # survey_sentiment
//!
//! Sentiment and word-frequency analysis of per-country survey responses.
//!
//! Each country is one CSV file (`<Country>.csv`) with at least the columns `text`, `country`,
//! `q_num` and `score`. On load every response is cleaned (punctuation and stopwords removed,
//! lowercased) and scored against an AFINN-style lexicon. A [`Dashboard`] then turns any
//! selection of countries into three chart-ready tables:
//!
//! - sentiment scatter points (question number vs. sentiment, sized by reporter score),
//! - a word-flow diagram from countries to the most common words,
//! - the average cleaned word count per reporter score and country.
//!
//! ## Example
//! ```no_run
//! use std::path::Path;
//! use survey_sentiment::{Dashboard, DashboardOptions, TextPipeline};
//!
//! let dashboard = Dashboard::load(
//!     Path::new("countries"),
//!     &TextPipeline::default(),
//!     None,
//!     DashboardOptions::default(),
//! )?;
//! let view = dashboard.view(&["SouthAfrica", "Montenegro"])?;
//! println!("{}", view.summary());
//! # Ok::<(), survey_sentiment::Error>(())
//! ```

pub mod aggregate;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod export;
pub mod flow;
pub mod normalize;
pub mod sentiment;

pub use aggregate::{
    CountrySentiment, DEFAULT_TOP_N, MatchMode, ScoreGroup, SentimentPoint, WordCount,
    WordOccurrence, average_word_count_by_score, count_words, most_common, sentiment_points,
    sentiment_summary, top_words, word_occurrences,
};
pub use dashboard::{Dashboard, DashboardOptions, DashboardView};
pub use dataset::{
    CountryDataset, CountryMap, REQUIRED_COLUMNS, Record, TextPipeline, collect_csv_files,
    load_country, read_records,
};
pub use error::{Error, Result};
pub use export::{ExportFormat, csv_safe_cell, export_view, save_file};
pub use flow::{FlowDiagram, FlowLink};
pub use normalize::{ENGLISH_STOPWORDS, Normalizer, load_stopwords, strip_punctuation};
pub use sentiment::{AFINN_RANGE, Lexicon};
