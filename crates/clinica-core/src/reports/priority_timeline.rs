use chrono::NaiveDateTime;
use clinica_parser::{Admission, ProgressNote};
use tracing::info;

use crate::chart::{TimelineBar, TimelineChart};
use crate::config::ReportConfig;
use crate::join::{join_latest, latest_notes};
use crate::metrics;
use crate::table::{cell, minutes_cell, ReportTable};

use super::{DISPLAY_TIME_FORMAT, NO_CLINICIAN};

const TITLE: &str = "URGENCIAS PRIORITARIA – Línea de tiempo de consultas médicas";
const CHART_HEIGHT: u32 = 800;

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityVisit {
    pub admission_id: String,
    pub patient_name: Option<String>,
    /// Clinician assigned on the admission.
    pub clinician: Option<String>,
    /// Specialty of the latest note.
    pub specialty: Option<String>,
    pub patient_status: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub duration_minutes: Option<f64>,
}

impl PriorityVisit {
    pub fn row_label(&self) -> String {
        format!(
            "{} | {}",
            self.admission_id,
            self.patient_name.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityTimeline {
    pub visits: Vec<PriorityVisit>,
}

pub fn build_priority_timeline(
    admissions: &[Admission],
    notes: &[ProgressNote],
    config: &ReportConfig,
) -> PriorityTimeline {
    // an empty specialty on the latest note falls back to the latest note that has one
    let specialties = latest_notes(notes.iter().filter(|note| note.specialty.is_some()));

    let visits: Vec<PriorityVisit> = join_latest(admissions, notes)
        .into_iter()
        .filter(|joined| {
            joined
                .admission
                .in_department(&config.priority_department)
        })
        .map(|joined| {
            let admission = joined.admission;
            let end = joined.latest_note.and_then(|note| note.noted_at);
            PriorityVisit {
                admission_id: admission.admission_id.clone(),
                patient_name: admission.patient_name.clone(),
                clinician: admission.clinician.clone(),
                specialty: specialties
                    .get(admission.admission_id.as_str())
                    .and_then(|note| note.specialty.clone()),
                patient_status: admission.patient_status.clone(),
                start: admission.consultation_at,
                end,
                duration_minutes: metrics::consultation_minutes(admission.consultation_at, end),
            }
        })
        .collect();

    info!(
        department = %config.priority_department,
        visits = visits.len(),
        drawable = visits.iter().filter(|v| v.duration_minutes.is_some()).count(),
        "built priority timeline"
    );

    PriorityTimeline { visits }
}

impl PriorityTimeline {
    pub fn chart(&self) -> TimelineChart {
        let mut chart = TimelineChart::new(TITLE, "Hora", "Ingreso / Paciente");
        chart.legend_title = Some("Médico".to_string());
        chart.height = Some(CHART_HEIGHT);
        chart.bars = self
            .visits
            .iter()
            .filter_map(|visit| {
                let (start, end) = (visit.start?, visit.end?);
                Some(TimelineBar {
                    row_label: visit.row_label(),
                    start,
                    end,
                    group: visit
                        .clinician
                        .clone()
                        .unwrap_or_else(|| NO_CLINICIAN.to_string()),
                    hover: vec![
                        ("duracion_min".to_string(), minutes_cell(visit.duration_minutes)),
                        ("especialidad".to_string(), cell(visit.specialty.as_deref())),
                        (
                            "estado_del_paciente".to_string(),
                            cell(visit.patient_status.as_deref()),
                        ),
                    ],
                })
            })
            .collect();
        chart
    }

    pub fn table(&self) -> ReportTable {
        let mut table = ReportTable::new([
            "ingreso",
            "nombre_paciente",
            "medico",
            "inicio_consulta",
            "fin_consulta",
            "duracion_min",
        ]);
        for visit in &self.visits {
            table.push_row(vec![
                visit.admission_id.clone(),
                cell(visit.patient_name.as_deref()),
                cell(visit.clinician.as_deref()),
                cell(visit.start.map(|t| t.format(DISPLAY_TIME_FORMAT))),
                cell(visit.end.map(|t| t.format(DISPLAY_TIME_FORMAT))),
                minutes_cell(visit.duration_minutes),
            ]);
        }
        table
    }
}
