use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{extract}: failed to read {}: {source}", .path.display())]
    Io {
        extract: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{extract} CSV error: {source}")]
    Csv {
        extract: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{extract} file did not contain a header row")]
    EmptyHeader { extract: &'static str },

    #[error("{extract} header is missing required column '{column}'")]
    MissingColumn {
        extract: &'static str,
        column: &'static str,
    },

    #[error("{extract} data row {line_index} has an empty '{column}' identifier")]
    MissingIdentifier {
        extract: &'static str,
        line_index: usize,
        column: &'static str,
    },

    #[error("{extract} data row {line_index} column '{column}': invalid timestamp '{value}'")]
    InvalidTimestamp {
        extract: &'static str,
        line_index: usize,
        column: &'static str,
        value: String,
    },
}

impl ParserError {
    pub(crate) fn csv(extract: &'static str, source: csv::Error) -> Self {
        ParserError::Csv { extract, source }
    }
}
