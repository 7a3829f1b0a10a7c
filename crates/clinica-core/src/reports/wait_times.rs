//! Wait-time report for the walk-in consulting rooms.
//!
//! For each admission: minutes from arrival to consultation start and, for long waits,
//! the notes the assigned clinician wrote while the patient was waiting.

use chrono::NaiveDateTime;
use clinica_parser::{Admission, ProgressNote};
use polars::prelude::*;
use tracing::info;

use crate::anonymize::ClinicianPseudonyms;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::metrics::{self, round2};
use crate::table::{cell, minutes_cell, ReportTable};

use super::DISPLAY_TIME_FORMAT;

pub const NO_NOTES_IN_INTERVAL: &str = "Sin evoluciones en ese intervalo";
const NOTE_SEPARATOR: &str = " | ";

pub const COLUMNS: [&str; 7] = [
    "ingreso",
    "plan_descripcion",
    "medico",
    "fechaingreso",
    "fecha_consulta",
    "minutos_espera",
    "evoluciones_en_espera",
];

#[derive(Debug, Clone, PartialEq)]
pub struct WaitTimeRow {
    pub admission_id: String,
    pub plan_description: Option<String>,
    pub clinician: Option<String>,
    pub admitted_at: Option<NaiveDateTime>,
    pub consultation_at: Option<NaiveDateTime>,
    pub wait_minutes: Option<f64>,
    pub notes_during_wait: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClinicianAverage {
    pub clinician: String,
    pub mean_wait_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaitTimeReport {
    pub rows: Vec<WaitTimeRow>,
    /// Mean wait over every row, rounded to two decimals.
    pub overall_mean: Option<f64>,
    /// Mean wait per clinician, longest first.
    pub by_clinician: Vec<ClinicianAverage>,
}

pub fn build_wait_time_report(
    admissions: &[Admission],
    notes: &[ProgressNote],
    config: &ReportConfig,
) -> Result<WaitTimeReport> {
    let mut rows: Vec<WaitTimeRow> = admissions
        .iter()
        .filter(|admission| admission.in_department(&config.triage_department))
        .map(|admission| wait_time_row(admission, notes, config.wait_threshold_minutes))
        .collect();
    info!(
        department = %config.triage_department,
        rows = rows.len(),
        "built wait-time rows"
    );

    if let Some(visible) = config.visible_clinician() {
        let pseudonyms =
            ClinicianPseudonyms::build(visible, rows.iter().map(|row| row.clinician.as_deref()));
        for row in &mut rows {
            row.clinician = pseudonyms.rename(row.clinician.as_deref());
        }
        info!(masked = pseudonyms.len(), "anonymized clinicians");
    }

    let frame = wait_time_frame(&rows)?;
    let overall_mean = frame
        .column("minutos_espera")?
        .f64()?
        .mean()
        .map(round2);
    let by_clinician = clinician_averages(&frame)?;

    Ok(WaitTimeReport {
        rows,
        overall_mean,
        by_clinician,
    })
}

fn wait_time_row(admission: &Admission, notes: &[ProgressNote], threshold: f64) -> WaitTimeRow {
    let wait_minutes = metrics::wait_minutes(admission.admitted_at, admission.consultation_at);
    let notes_during_wait = match wait_minutes {
        Some(wait) if wait <= threshold => format!("No aplica (≤{threshold} min)"),
        _ => notes_written_while_waiting(admission, notes),
    };

    WaitTimeRow {
        admission_id: admission.admission_id.clone(),
        plan_description: admission.plan_description.clone(),
        clinician: admission.clinician.clone(),
        admitted_at: admission.admitted_at,
        consultation_at: admission.consultation_at,
        wait_minutes,
        notes_during_wait,
    }
}

/// Notes by the admission's clinician dated within `[admitted_at, consultation_at]`.
fn notes_written_while_waiting(admission: &Admission, notes: &[ProgressNote]) -> String {
    let (Some(clinician), Some(from), Some(to)) = (
        admission.clinician.as_deref(),
        admission.admitted_at,
        admission.consultation_at,
    ) else {
        return NO_NOTES_IN_INTERVAL.to_string();
    };

    let stamps: Vec<String> = notes
        .iter()
        .filter(|note| note.clinician.as_deref() == Some(clinician))
        .filter_map(|note| note.noted_at)
        .filter(|noted_at| *noted_at >= from && *noted_at <= to)
        .map(|noted_at| noted_at.format(DISPLAY_TIME_FORMAT).to_string())
        .collect();

    if stamps.is_empty() {
        NO_NOTES_IN_INTERVAL.to_string()
    } else {
        stamps.join(NOTE_SEPARATOR)
    }
}

/// One row per admission, columns as in [`COLUMNS`].
pub fn wait_time_frame(rows: &[WaitTimeRow]) -> PolarsResult<DataFrame> {
    let display =
        |ts: Option<NaiveDateTime>| ts.map(|t| t.format(DISPLAY_TIME_FORMAT).to_string());

    let ids: Vec<&str> = rows.iter().map(|row| row.admission_id.as_str()).collect();
    let plans: Vec<Option<&str>> = rows
        .iter()
        .map(|row| row.plan_description.as_deref())
        .collect();
    let clinicians: Vec<Option<&str>> = rows.iter().map(|row| row.clinician.as_deref()).collect();
    let admitted: Vec<Option<String>> = rows.iter().map(|row| display(row.admitted_at)).collect();
    let admitted: Vec<Option<&str>> = admitted.iter().map(|v| v.as_deref()).collect();
    let consulted: Vec<Option<String>> =
        rows.iter().map(|row| display(row.consultation_at)).collect();
    let consulted: Vec<Option<&str>> = consulted.iter().map(|v| v.as_deref()).collect();
    let waits: Vec<Option<f64>> = rows.iter().map(|row| row.wait_minutes).collect();
    let notes: Vec<&str> = rows
        .iter()
        .map(|row| row.notes_during_wait.as_str())
        .collect();

    DataFrame::new(vec![
        Series::new(COLUMNS[0].into(), ids).into(),
        Series::new(COLUMNS[1].into(), plans).into(),
        Series::new(COLUMNS[2].into(), clinicians).into(),
        Series::new(COLUMNS[3].into(), admitted).into(),
        Series::new(COLUMNS[4].into(), consulted).into(),
        Series::new(COLUMNS[5].into(), waits).into(),
        Series::new(COLUMNS[6].into(), notes).into(),
    ])
}

fn clinician_averages(frame: &DataFrame) -> Result<Vec<ClinicianAverage>> {
    let averages = frame
        .clone()
        .lazy()
        .filter(col("medico").is_not_null())
        .group_by_stable([col("medico")])
        .agg([col("minutos_espera").mean().alias("minutos_espera")])
        .sort(
            ["minutos_espera"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let names = averages.column("medico")?.str()?;
    let means = averages.column("minutos_espera")?.f64()?;

    Ok(names
        .into_iter()
        .zip(means)
        .filter_map(|(name, mean)| {
            name.map(|clinician| ClinicianAverage {
                clinician: clinician.to_string(),
                mean_wait_minutes: mean,
            })
        })
        .collect())
}

impl WaitTimeReport {
    pub fn table(&self) -> ReportTable {
        let mut table = ReportTable::new(COLUMNS);
        for row in &self.rows {
            table.push_row(vec![
                row.admission_id.clone(),
                cell(row.plan_description.as_deref()),
                cell(row.clinician.as_deref()),
                cell(row.admitted_at.map(|t| t.format(DISPLAY_TIME_FORMAT))),
                cell(row.consultation_at.map(|t| t.format(DISPLAY_TIME_FORMAT))),
                minutes_cell(row.wait_minutes),
                row.notes_during_wait.clone(),
            ]);
        }
        table
    }

    pub fn averages_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["medico", "minutos_espera"]);
        for average in &self.by_clinician {
            table.push_row(vec![
                average.clinician.clone(),
                minutes_cell(average.mean_wait_minutes),
            ]);
        }
        table
    }
}
