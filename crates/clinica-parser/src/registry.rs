use std::fs;
use std::path::Path;

use tracing::info;

use crate::errors::ParserError;
use crate::formats::{decode_latin1, AdmissionsParser, ProgressNotesParser};
use crate::model::{Admission, ProgressNote};

pub trait ExtractParser {
    type Record;

    fn name(&self) -> &'static str;
    fn parse(&self, content: &str) -> Result<Vec<Self::Record>, ParserError>;
}

/// Reads a Latin-1 encoded extract from disk and parses it with `parser`.
pub fn load_extract<P: ExtractParser>(
    parser: &P,
    path: &Path,
) -> Result<Vec<P::Record>, ParserError> {
    let bytes = fs::read(path).map_err(|source| ParserError::Io {
        extract: parser.name(),
        path: path.to_path_buf(),
        source,
    })?;
    let content = decode_latin1(&bytes);
    let records = parser.parse(&content)?;
    info!(
        extract = parser.name(),
        path = %path.display(),
        rows = records.len(),
        "loaded extract"
    );
    Ok(records)
}

pub fn load_admissions(path: &Path) -> Result<Vec<Admission>, ParserError> {
    load_extract(&AdmissionsParser, path)
}

pub fn load_progress_notes(path: &Path) -> Result<Vec<ProgressNote>, ParserError> {
    load_extract(&ProgressNotesParser, path)
}
