use crate::errors::ParserError;
use crate::model::{Admission, ExtractKind};
use crate::registry::ExtractParser;

use super::schema::{
    ADMISSION_DEPARTMENT, ADMISSION_ID, ADMITTED_AT, CLINICIAN, CLOSED_AT, CONSULTATION_AT,
    PATIENT_NAME, PATIENT_STATUS, PLAN_DESCRIPTION, REQUIRED_ADMISSION_COLUMNS,
};
use super::{read_tsv, ColumnIndex, ExtractRow};

/// Parser for the admissions extract (`Ingresos_Consultorios.csv`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AdmissionsParser;

impl AdmissionsParser {
    const NAME: &'static str = ExtractKind::Admissions.as_str();
}

impl ExtractParser for AdmissionsParser {
    type Record = Admission;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn parse(&self, content: &str) -> Result<Vec<Admission>, ParserError> {
        let (header, records) = read_tsv(Self::NAME, content)?;
        let columns = ColumnIndex::new(Self::NAME, &header);
        columns.require_all(REQUIRED_ADMISSION_COLUMNS)?;

        let id_col = columns.required(ADMISSION_ID)?;
        let department_col = columns.optional(ADMISSION_DEPARTMENT);
        let patient_col = columns.optional(PATIENT_NAME);
        let admitted_col = columns.optional(ADMITTED_AT);
        let consultation_col = columns.optional(CONSULTATION_AT);
        let closed_col = columns.optional(CLOSED_AT);
        let clinician_col = columns.optional(CLINICIAN);
        let plan_col = columns.optional(PLAN_DESCRIPTION);
        let status_col = columns.optional(PATIENT_STATUS);

        let mut admissions = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            let row = ExtractRow {
                extract: Self::NAME,
                line_index: idx + 2,
                record,
            };

            admissions.push(Admission {
                admission_id: row.identifier(id_col, ADMISSION_ID)?,
                department: row.text(department_col),
                patient_name: row.text(patient_col),
                admitted_at: row.timestamp(admitted_col, ADMITTED_AT)?,
                consultation_at: row.timestamp(consultation_col, CONSULTATION_AT)?,
                closed_at: row.timestamp(closed_col, CLOSED_AT)?,
                clinician: row.text(clinician_col),
                plan_description: row.text(plan_col),
                patient_status: row.text(status_col),
            });
        }

        Ok(admissions)
    }
}
