use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReportError, Result};

pub const ADMISSIONS_PATH_VAR: &str = "CLINICA_ADMISSIONS_PATH";
pub const NOTES_PATH_VAR: &str = "CLINICA_NOTES_PATH";
pub const VISIBLE_CLINICIAN_VAR: &str = "CLINICA_VISIBLE_CLINICIAN";

/// Upper bound for `default_attention_minutes`: one day.
pub const MAX_DEFAULT_ATTENTION_MINUTES: i64 = 24 * 60;

/// Settings shared by every report. Loaded from TOML, then environment, then CLI flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub admissions_path: PathBuf,
    pub notes_path: PathBuf,
    /// Department of the walk-in consulting rooms (wait-time and attention reports).
    pub triage_department: String,
    /// Department of the priority-urgency service.
    pub priority_department: String,
    /// Specialty whose notes close an attention interval.
    pub attention_specialty: String,
    /// Waits at or below this many minutes are not searched for notes.
    pub wait_threshold_minutes: f64,
    /// Attention length assumed when an admission has no closing note.
    pub default_attention_minutes: i64,
    /// The one clinician left unmasked when anonymizing.
    pub visible_clinician: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            admissions_path: PathBuf::from("Ingresos_Consultorios.csv"),
            notes_path: PathBuf::from("medicos_evoluciones.csv"),
            triage_department: "URGENCIAS CONSULTORIOS Y PROCEDIMIENTOS".to_string(),
            priority_department: "URGENCIAS PRIORITARIA".to_string(),
            attention_specialty: "MEDICINA GENERAL".to_string(),
            wait_threshold_minutes: 20.0,
            default_attention_minutes: 20,
            visible_clinician: None,
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: ReportConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when given; otherwise starts from the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|err| {
                    ReportError::Config(format!("failed to read {}: {err}", path.display()))
                })?;
                Self::from_toml_str(&raw)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ADMISSIONS_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            self.admissions_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(NOTES_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            self.notes_path = PathBuf::from(path);
        }
        if let Some(name) = lookup(VISIBLE_CLINICIAN_VAR) {
            self.visible_clinician = Some(name);
        }
    }

    /// The configured visible clinician, if anonymization is enabled.
    pub fn visible_clinician(&self) -> Option<&str> {
        self.visible_clinician
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.wait_threshold_minutes.is_finite() || self.wait_threshold_minutes < 0.0 {
            return Err(ReportError::Config(format!(
                "wait_threshold_minutes must be a non-negative number, got {}",
                self.wait_threshold_minutes
            )));
        }
        if !(0..=MAX_DEFAULT_ATTENTION_MINUTES).contains(&self.default_attention_minutes) {
            return Err(ReportError::Config(format!(
                "default_attention_minutes must be between 0 and {}, got {}",
                MAX_DEFAULT_ATTENTION_MINUTES, self.default_attention_minutes
            )));
        }
        Ok(())
    }
}
