//! A dashboard session: loaded countries plus options, recomputed per selection.

use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::aggregate::{
    self, CountrySentiment, DEFAULT_TOP_N, MatchMode, ScoreGroup, SentimentPoint, WordCount,
    WordOccurrence,
};
use crate::dataset::{CountryMap, TextPipeline};
use crate::error::Result;
use crate::flow::FlowDiagram;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Words shown in the flow diagram.
    pub top_n: usize,
    pub match_mode: MatchMode,
    /// Flow links below this value are dropped.
    pub min_link_value: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            match_mode: MatchMode::default(),
            min_link_value: 0,
        }
    }
}

/// Everything the three charts need for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Vec<String>,
    pub sentiment: Vec<SentimentPoint>,
    pub sentiment_summary: Vec<CountrySentiment>,
    pub top_words: Vec<WordCount>,
    pub occurrences: Vec<WordOccurrence>,
    pub flow: FlowDiagram,
    pub word_counts: Vec<ScoreGroup>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    countries: CountryMap,
    options: DashboardOptions,
}

impl Dashboard {
    pub fn new(countries: CountryMap, options: DashboardOptions) -> Self {
        Self { countries, options }
    }

    /// Loads the survey files of `data_dir` (optionally only `only`) and opens a session.
    pub fn load(
        data_dir: &Path,
        pipeline: &TextPipeline,
        only: Option<&[String]>,
        options: DashboardOptions,
    ) -> Result<Self> {
        let countries = CountryMap::load_dir(data_dir, pipeline, only)?;
        Ok(Self::new(countries, options))
    }

    pub fn countries(&self) -> &CountryMap {
        &self.countries
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Recomputes all chart tables for `selection`. Fails only on unknown countries.
    pub fn view<S: AsRef<str>>(&self, selection: &[S]) -> Result<DashboardView> {
        let selected = self.countries.select(selection)?;
        debug!("Recomputing dashboard for {} countries", selected.len());

        let names: Vec<String> = selected.iter().map(|d| d.name.clone()).collect();
        let top_words = aggregate::top_words(&selected, self.options.top_n);
        let occurrences =
            aggregate::word_occurrences(&selected, &top_words, self.options.match_mode);
        let flow =
            FlowDiagram::from_occurrences(&names, &occurrences, self.options.min_link_value);

        Ok(DashboardView {
            selection: names,
            sentiment: aggregate::sentiment_points(&selected),
            sentiment_summary: aggregate::sentiment_summary(&selected),
            top_words,
            occurrences,
            flow,
            word_counts: aggregate::average_word_count_by_score(&selected),
        })
    }
}

impl DashboardView {
    /// Plain-text report of the view, as printed by the CLI.
    pub fn summary(&self) -> String {
        let mut out = format!("Countries: {}\n", self.selection.join(", "));

        out.push_str("\nSentiment by country:\n");
        for c in &self.sentiment_summary {
            if c.records == 0 {
                out.push_str(&format!("  {}\tno records\n", c.country));
                continue;
            }
            out.push_str(&format!(
                "  {}\trecords={}\tmean={:.2}\tmin={}\tmax={}\n",
                c.country, c.records, c.mean, c.min, c.max
            ));
        }

        out.push_str(&format!("\nTop {} words:\n", self.top_words.len()));
        for w in &self.top_words {
            out.push_str(&format!("  {}\t{}\n", w.word, w.count));
        }

        out.push_str("\nWord flow (country -> word: records):\n");
        for (source, target, value) in self.flow.triples() {
            out.push_str(&format!("  {source} -> {target}: {value}\n"));
        }

        out.push_str("\nAverage word count by score:\n");
        for g in &self.word_counts {
            out.push_str(&format!(
                "  score={}\t{}\t{:.2}\n",
                g.score, g.country, g.avg_word_count
            ));
        }
        out
    }
}
