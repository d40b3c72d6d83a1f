//! Word-flow (Sankey) diagram: countries on the left, top words on the right,
//! link width = number of the country's records mentioning the word.

use serde::Serialize;

use crate::aggregate::WordOccurrence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlowLink {
    /// Index into [`FlowDiagram::nodes`].
    pub source: usize,
    pub target: usize,
    pub value: u32,
}

/// Renderer-neutral node/link form of the diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowDiagram {
    pub nodes: Vec<String>,
    pub links: Vec<FlowLink>,
}

impl FlowDiagram {
    /// Builds the diagram from (country, word, count) rows.
    ///
    /// Every country of `countries` gets a node, in that order, even without rows; countries
    /// only named by a row follow. Word nodes come last. A country and a word spelled the same
    /// stay separate nodes. Links with `value < min_value` are dropped; their nodes are kept.
    pub fn from_occurrences<S: AsRef<str>>(
        countries: &[S],
        rows: &[WordOccurrence],
        min_value: u32,
    ) -> Self {
        let mut sources: Vec<&str> = Vec::with_capacity(countries.len());
        for c in countries {
            if !sources.contains(&c.as_ref()) {
                sources.push(c.as_ref());
            }
        }
        let mut targets: Vec<&str> = Vec::new();
        for row in rows {
            if !sources.contains(&row.country.as_str()) {
                sources.push(&row.country);
            }
            if !targets.contains(&row.word.as_str()) {
                targets.push(&row.word);
            }
        }

        let links = rows
            .iter()
            .filter(|row| row.records >= min_value)
            .filter_map(|row| {
                let s = sources.iter().position(|c| *c == row.country)?;
                let t = targets.iter().position(|w| *w == row.word)?;
                Some(FlowLink {
                    source: s,
                    target: sources.len() + t,
                    value: row.records,
                })
            })
            .collect();

        let nodes = sources
            .iter()
            .chain(targets.iter())
            .map(|s| s.to_string())
            .collect();
        Self { nodes, links }
    }

    /// `(source label, target label, value)` triples.
    pub fn triples(&self) -> Vec<(&str, &str, u32)> {
        self.links
            .iter()
            .map(|l| {
                (
                    self.nodes[l.source].as_str(),
                    self.nodes[l.target].as_str(),
                    l.value,
                )
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
