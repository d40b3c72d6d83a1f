//! Writing dashboard tables to disk as txt, csv, tsv or json.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use log::info;
use serde::Serialize;

use crate::dashboard::DashboardView;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// Neutralizes spreadsheet formulas: a cell starting with `=`, `+`, `-`, `@`, tab or carriage
/// return gets a leading `'`. Cells already starting with `'` are left alone.
///
/// ```
/// use survey_sentiment::csv_safe_cell;
/// assert_eq!(csv_safe_cell("=SUM(A1)".to_string()), "'=SUM(A1)");
/// assert_eq!(csv_safe_cell("wetland".to_string()), "wetland");
/// ```
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell,
    }
}

/// Writes every table of `view` into `out_dir` and returns the written paths.
///
/// Files are named `<countries>_<YYYYmmdd_HHMMSS>_<table>.<ext>`.
pub fn export_view(
    view: &DashboardView,
    out_dir: &Path,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;
    let stem = file_stem(view);
    let path_for = |table: &str| out_dir.join(format!("{stem}_{table}.{}", format.extension()));

    let mut written = Vec::new();
    match format {
        ExportFormat::Txt => {
            let p = path_for("summary");
            save_file(&view.summary(), &p)?;
            written.push(p);
        }
        ExportFormat::Json => {
            let p = path_for("sentiment");
            write_json(&p, &view.sentiment)?;
            written.push(p);
            let p = path_for("topwords");
            write_json(&p, &view.top_words)?;
            written.push(p);
            // nodes + links, ready for a d3/plotly sankey
            let p = path_for("flow");
            write_json(&p, &view.flow)?;
            written.push(p);
            let p = path_for("wordcount");
            write_json(&p, &view.word_counts)?;
            written.push(p);
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            for (table, header, rows) in delimited_tables(view) {
                let p = path_for(table);
                write_delimited(&p, delimiter, &header, rows)?;
                written.push(p);
            }
        }
    }
    info!("Exported {} files to {}", written.len(), out_dir.display());
    Ok(written)
}

fn file_stem(view: &DashboardView) -> String {
    let local: DateTime<Local> = Local::now();
    let countries = if view.selection.is_empty() {
        "none".to_string()
    } else {
        view.selection.join("-")
    };
    format!("{countries}_{}", local.format("%Y%m%d_%H%M%S"))
}

type Table = (&'static str, Vec<&'static str>, Vec<Vec<String>>);

fn delimited_tables(view: &DashboardView) -> Vec<Table> {
    let sentiment: Vec<Vec<String>> = view
        .sentiment
        .iter()
        .map(|p| {
            vec![
                csv_safe_cell(p.country.clone()),
                csv_safe_cell(p.q_num.clone()),
                p.sentiment.to_string(),
                p.marker_size.to_string(),
            ]
        })
        .collect();
    let top_words: Vec<Vec<String>> = view
        .top_words
        .iter()
        .map(|w| vec![w.word.clone(), w.count.to_string()])
        .collect();
    let flow: Vec<Vec<String>> = view
        .flow
        .triples()
        .into_iter()
        .map(|(s, t, v)| vec![csv_safe_cell(s.to_string()), t.to_string(), v.to_string()])
        .collect();
    let word_counts: Vec<Vec<String>> = view
        .word_counts
        .iter()
        .map(|g| {
            vec![
                g.score.to_string(),
                csv_safe_cell(g.country.clone()),
                format!("{:.4}", g.avg_word_count),
                g.records.to_string(),
            ]
        })
        .collect();

    vec![
        (
            "sentiment",
            vec!["country", "q_num", "sentiment", "marker_size"],
            sentiment,
        ),
        ("topwords", vec!["word", "count"], top_words),
        ("flow", vec!["source", "target", "value"], flow),
        (
            "wordcount",
            vec!["score", "country", "avg_word_count", "records"],
            word_counts,
        ),
    ]
}

fn write_delimited(
    path: &Path,
    delimiter: u8,
    header: &[&str],
    rows: Vec<Vec<String>>,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;
    wtr.write_record(header).map_err(|e| Error::csv(path, e))?;
    for row in rows {
        wtr.write_record(&row).map_err(|e| Error::csv(path, e))?;
    }
    wtr.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush().map_err(|e| Error::io(path, e))?;
    Ok(())
}

///save text to path, replacing any previous content.
pub fn save_file(content: &str, path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Dashboard, DashboardOptions};
    use crate::dataset::{CountryDataset, CountryMap, TextPipeline};

    fn view() -> DashboardView {
        let p = TextPipeline::default();
        let mut map = CountryMap::new();
        map.insert(CountryDataset::new(
            "India",
            vec![
                p.record("Great wetland", "India", "1", 2),
                p.record("Polluted lake", "=India", "2", 0),
            ],
        ));
        Dashboard::new(map, DashboardOptions::default())
            .view(&["India"])
            .unwrap()
    }

    #[test]
    fn no_double_prefix_when_cell_already_safe() {
        assert_eq!(csv_safe_cell("'@SAFE".to_string()), "'@SAFE");
        assert_eq!(csv_safe_cell("-1".to_string()), "'-1");
        assert_eq!(csv_safe_cell(String::new()), "");
    }

    #[test]
    fn csv_export_writes_four_tables() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_view(&view(), dir.path(), ExportFormat::Csv).unwrap();
        assert_eq!(files.len(), 4);
        for f in &files {
            assert!(f.exists());
            let name = f.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with("India_"), "{name}");
        }
        let sentiment = fs::read_to_string(&files[0]).unwrap();
        let mut lines = sentiment.lines();
        assert_eq!(lines.next(), Some("country,q_num,sentiment,marker_size"));
        assert_eq!(lines.next(), Some("India,1,3,4"));
        assert_eq!(lines.next(), Some("'=India,2,-2,2"));
    }

    #[test]
    fn tsv_export_uses_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_view(&view(), dir.path(), ExportFormat::Tsv).unwrap();
        let top = fs::read_to_string(&files[1]).unwrap();
        assert!(top.starts_with("word\tcount\n"));
        assert!(top.contains("great\t1"));
    }

    #[test]
    fn json_flow_has_nodes_and_links() {
        let dir = tempfile::tempdir().unwrap();
        let files = export_view(&view(), dir.path(), ExportFormat::Json).unwrap();
        let flow = files
            .iter()
            .find(|p| p.to_string_lossy().ends_with("_flow.json"))
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(flow).unwrap()).unwrap();
        assert_eq!(v["nodes"][0], "India");
        assert_eq!(v["links"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn txt_export_is_the_summary() {
        let dir = tempfile::tempdir().unwrap();
        let v = view();
        let files = export_view(&v, dir.path(), ExportFormat::Txt).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), v.summary());
    }
}
