use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading survey data or exporting results.
///
/// Empty selections and empty datasets are not errors; they produce empty tables.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("No survey file for country '{0}'")]
    MissingCountry(String),

    #[error("Unknown country '{name}' (loaded: {})", .known.join(", "))]
    UnknownCountry { name: String, known: Vec<String> },

    #[error("Lexicon line {line}: {message}")]
    Lexicon { line: usize, message: String },

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
