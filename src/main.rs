#![forbid(unsafe_code)]
//! # Survey Sentiment CLI
//!
//! Command-line front end of the `survey_sentiment` crate. It loads one survey CSV per
//! country, computes the dashboard tables for a country selection and prints them, optionally
//! exporting them to disk.
//!
//! ## Features
//! - Select any subset of the loaded countries.
//! - Export results as txt, csv, tsv or json.
//! - Extra stopwords and a full AFINN lexicon can be supplied as files.
//! - Interactive mode: one selection per input line, each recomputed from scratch.
//!
//! ## Example
//! ```bash
//! cargo run --release -- countries --countries SouthAfrica,Montenegro --export-format json
//! ```
//!
//! See `--help` for all available options.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{error, info};
use survey_sentiment::{
    Dashboard, DashboardOptions, ExportFormat, Lexicon, MatchMode, Normalizer, Result,
    TextPipeline, export_view, load_stopwords,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory with one <Country>.csv per country (or a single CSV file)
    data_dir: PathBuf,

    /// Countries to show, comma separated (default: every loaded country)
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// Number of most common words in the word-flow diagram
    #[arg(long, default_value_t = 20)]
    top_n: usize,

    /// Drop word-flow links with fewer records than this
    #[arg(long, default_value_t = 0)]
    min_link_value: u32,

    /// Count word occurrences by exact token instead of substring (default: false)
    #[arg(long, default_value_t = false)]
    token_match: bool,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Optional AFINN lexicon file (<word>\t<score> per line) replacing the built-in one
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Export the tables in this format (txt, csv, tsv, json)
    #[arg(long)]
    export_format: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Read one comma-separated country selection per line from stdin
    #[arg(long, default_value_t = false)]
    interactive: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut normalizer = Normalizer::english();
    if let Some(path) = &cli.stopwords {
        normalizer = normalizer.with_extra_stopwords(load_stopwords(path)?);
    }
    let lexicon = match &cli.lexicon {
        Some(path) => Lexicon::from_path(path)?,
        None => Lexicon::english(),
    };
    let pipeline = TextPipeline::new(normalizer, lexicon);

    let options = DashboardOptions {
        top_n: cli.top_n,
        match_mode: if cli.token_match {
            MatchMode::Token
        } else {
            MatchMode::Substring
        },
        min_link_value: cli.min_link_value,
    };

    // Interactive sessions may switch to any country, so everything is loaded.
    let only = (!cli.interactive && !cli.countries.is_empty()).then_some(cli.countries.as_slice());
    let dashboard = Dashboard::load(&cli.data_dir, &pipeline, only, options)?;

    if cli.interactive {
        return interactive(&dashboard, cli.export_format, &cli.out_dir);
    }

    let selection = if cli.countries.is_empty() {
        dashboard.countries().names()
    } else {
        cli.countries.clone()
    };
    show(&dashboard, &selection, cli.export_format, &cli.out_dir)
}

fn show(
    dashboard: &Dashboard,
    selection: &[String],
    format: Option<ExportFormat>,
    out_dir: &Path,
) -> Result<()> {
    let view = dashboard.view(selection)?;
    println!("{}", view.summary());
    if let Some(format) = format {
        for path in export_view(&view, out_dir, format)? {
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn interactive(dashboard: &Dashboard, format: Option<ExportFormat>, out_dir: &Path) -> Result<()> {
    let known = dashboard.countries().names();
    eprintln!("Loaded countries: {}", known.join(", "));
    eprintln!("Enter a comma-separated selection (empty line: all, 'quit' to stop).");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| survey_sentiment::Error::Io {
            path: PathBuf::from("<stdin>"),
            source: e,
        })?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        let selection: Vec<String> = if line.is_empty() {
            known.clone()
        } else {
            line.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };
        // A bad selection only affects this line.
        if let Err(e) = show(dashboard, &selection, format, out_dir) {
            error!("Error: {}", e);
        }
        let _ = io::stdout().flush();
    }
    Ok(())
}
