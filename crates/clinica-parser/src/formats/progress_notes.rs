use crate::errors::ParserError;
use crate::model::{ExtractKind, ProgressNote};
use crate::registry::ExtractParser;

use super::schema::{
    ADMISSION_ID, CLINICIAN, NOTED_AT, NOTE_DEPARTMENT, REQUIRED_NOTE_COLUMNS, SPECIALTY,
};
use super::{read_tsv, ColumnIndex, ExtractRow};

/// Parser for the progress-note extract (`medicos_evoluciones.csv`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProgressNotesParser;

impl ProgressNotesParser {
    const NAME: &'static str = ExtractKind::ProgressNotes.as_str();
}

impl ExtractParser for ProgressNotesParser {
    type Record = ProgressNote;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<Vec<ProgressNote>, ParserError> {
        let (header, records) = read_tsv(Self::NAME, content)?;
        let columns = ColumnIndex::new(Self::NAME, &header);
        columns.require_all(REQUIRED_NOTE_COLUMNS)?;

        let id_col = columns.required(ADMISSION_ID)?;
        let clinician_col = columns.optional(CLINICIAN);
        let specialty_col = columns.optional(SPECIALTY);
        let department_col = columns.optional(NOTE_DEPARTMENT);
        let noted_col = columns.optional(NOTED_AT);

        records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let row = ExtractRow {
                    extract: Self::NAME,
                    line_index: idx + 2,
                    record,
                };
                Ok(ProgressNote {
                    admission_id: row.identifier(id_col, ADMISSION_ID)?,
                    clinician: row.text(clinician_col),
                    specialty: row.text(specialty_col),
                    department: row.text(department_col),
                    noted_at: row.timestamp(noted_col, NOTED_AT)?,
                })
            })
            .collect()
    }
}
