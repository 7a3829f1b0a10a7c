use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// The two extracts exported by the clinic's information system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExtractKind {
    Admissions,
    ProgressNotes,
}

impl ExtractKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExtractKind::Admissions => "admissions",
            ExtractKind::ProgressNotes => "progress_notes",
        }
    }
}

impl fmt::Display for ExtractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One patient admission ("ingreso").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Admission {
    pub admission_id: String,
    pub department: Option<String>,
    pub patient_name: Option<String>,
    pub admitted_at: Option<NaiveDateTime>,
    pub consultation_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
    pub clinician: Option<String>,
    pub plan_description: Option<String>,
    pub patient_status: Option<String>,
}

impl Admission {
    pub fn new(admission_id: impl Into<String>) -> Self {
        Self {
            admission_id: admission_id.into(),
            department: None,
            patient_name: None,
            admitted_at: None,
            consultation_at: None,
            closed_at: None,
            clinician: None,
            plan_description: None,
            patient_status: None,
        }
    }

    pub fn in_department(&self, department: &str) -> bool {
        self.department.as_deref() == Some(department)
    }
}

/// One clinician-authored progress note ("evolución").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressNote {
    pub admission_id: String,
    pub clinician: Option<String>,
    pub specialty: Option<String>,
    pub department: Option<String>,
    pub noted_at: Option<NaiveDateTime>,
}

impl ProgressNote {
    pub fn new(admission_id: impl Into<String>, noted_at: Option<NaiveDateTime>) -> Self {
        Self {
            admission_id: admission_id.into(),
            clinician: None,
            specialty: None,
            department: None,
            noted_at,
        }
    }
}
