use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};

use crate::errors::ParserError;

const NULL_MARKERS: &[&str] = &["nan", "nat", "null", "na", "n/a", "none"];

/// Decodes ISO-8859-1 bytes. Every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Reads a tab-separated extract into its header and data records.
pub(crate) fn read_tsv(
    extract: &'static str,
    content: &str,
) -> Result<(StringRecord, Vec<StringRecord>), ParserError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let header = reader
        .headers()
        .map_err(|err| ParserError::csv(extract, err))?
        .clone();
    if header.iter().all(|field| field.trim().is_empty()) {
        return Err(ParserError::EmptyHeader { extract });
    }

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ParserError::csv(extract, err))?;
    Ok((header, records))
}

/// Header-name lookup for one extract.
pub(crate) struct ColumnIndex {
    extract: &'static str,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(extract: &'static str, header: &StringRecord) -> Self {
        let mut positions = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            // first occurrence wins on duplicated headers
            positions.entry(name.trim().to_string()).or_insert(idx);
        }
        Self { extract, positions }
    }

    pub fn require_all(&self, columns: &[&'static str]) -> Result<(), ParserError> {
        for column in columns {
            self.required(column)?;
        }
        Ok(())
    }

    pub fn required(&self, column: &'static str) -> Result<usize, ParserError> {
        self.optional(column).ok_or(ParserError::MissingColumn {
            extract: self.extract,
            column,
        })
    }

    pub fn optional(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}

/// A data record together with its 1-based line number in the extract.
pub(crate) struct ExtractRow<'a> {
    pub extract: &'static str,
    pub line_index: usize,
    pub record: &'a StringRecord,
}

impl<'a> ExtractRow<'a> {
    pub fn text(&self, position: Option<usize>) -> Option<String> {
        position
            .and_then(|idx| self.record.get(idx))
            .and_then(clean_optional)
    }

    pub fn identifier(
        &self,
        position: usize,
        column: &'static str,
    ) -> Result<String, ParserError> {
        self.text(Some(position))
            .ok_or(ParserError::MissingIdentifier {
                extract: self.extract,
                line_index: self.line_index,
                column,
            })
    }

    pub fn timestamp(
        &self,
        position: Option<usize>,
        column: &'static str,
    ) -> Result<Option<NaiveDateTime>, ParserError> {
        match self.text(position) {
            Some(value) => parse_timestamp(self.extract, &value, self.line_index, column).map(Some),
            None => Ok(None),
        }
    }
}

fn clean_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn parse_timestamp(
    extract: &'static str,
    value: &str,
    line_index: usize,
    column: &'static str,
) -> Result<NaiveDateTime, ParserError> {
    static DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];
    static DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

    let trimmed = value.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(dt);
            }
        }
    }
    Err(ParserError::InvalidTimestamp {
        extract,
        line_index,
        column,
        value: trimmed.to_string(),
    })
}
