use chrono::NaiveDateTime;
use clinica_parser::{Admission, ProgressNote};
use tracing::{info, warn};

use crate::chart::{TimelineBar, TimelineChart};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::join::join_latest;
use crate::lanes::{assign_lanes, lanes_used, Interval};
use crate::metrics;
use crate::table::ReportTable;

use super::NO_CLINICIAN;

const TITLE: &str = "Línea de tiempo Médico vs Paciente (Ingreso)";

/// One admission placed on its clinician's timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionSlot {
    pub admission_id: String,
    pub clinician: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `end` was assumed because no closing note exists.
    pub end_is_default: bool,
    pub lane: usize,
}

impl AttentionSlot {
    pub fn clinician_label(&self) -> &str {
        self.clinician.as_deref().unwrap_or(NO_CLINICIAN)
    }

    pub fn row_label(&self) -> String {
        format!("{} (slot {})", self.clinician_label(), self.lane)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttentionTimeline {
    /// Sorted by clinician (missing last), then start.
    pub slots: Vec<AttentionSlot>,
    /// Admissions dropped for lacking a consultation start.
    pub skipped: usize,
}

pub fn build_attention_timeline(
    admissions: &[Admission],
    notes: &[ProgressNote],
    config: &ReportConfig,
) -> Result<AttentionTimeline> {
    let department = config.triage_department.as_str();
    let admissions = admissions
        .iter()
        .filter(|admission| admission.in_department(department));
    let notes = notes.iter().filter(|note| {
        note.specialty.as_deref() == Some(config.attention_specialty.as_str())
            && note.department.as_deref() == Some(department)
    });

    let mut slots = Vec::new();
    let mut skipped = 0usize;
    for joined in join_latest(admissions, notes) {
        let admission = joined.admission;
        let Some(start) = admission.consultation_at else {
            warn!(
                admission_id = %admission.admission_id,
                "admission has no consultation start; left off the timeline"
            );
            skipped += 1;
            continue;
        };
        let last_note_at = joined.latest_note.and_then(|note| note.noted_at);
        slots.push(AttentionSlot {
            admission_id: admission.admission_id.clone(),
            clinician: admission.clinician.clone(),
            start,
            end: metrics::attention_end(start, last_note_at, config.default_attention_minutes)?,
            end_is_default: last_note_at.is_none(),
            lane: 0,
        });
    }

    slots.sort_by(|a, b| {
        (a.clinician.is_none(), &a.clinician, a.start).cmp(&(
            b.clinician.is_none(),
            &b.clinician,
            b.start,
        ))
    });

    let placed: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.clinician.is_some())
        .map(|(idx, _)| idx)
        .collect();
    let intervals: Vec<Interval<NaiveDateTime>> = placed
        .iter()
        .map(|&idx| {
            let slot = &slots[idx];
            Interval::new(slot.clinician_label(), slot.start, slot.end)
        })
        .collect();
    for (&idx, lane) in placed.iter().zip(assign_lanes(&intervals)) {
        slots[idx].lane = lane;
    }

    info!(
        slots = slots.len(),
        skipped,
        defaulted = slots.iter().filter(|slot| slot.end_is_default).count(),
        "built attention timeline"
    );

    Ok(AttentionTimeline { slots, skipped })
}

impl AttentionTimeline {
    /// Lanes opened per clinician, in timeline order.
    pub fn lane_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, Vec<usize>)> = Vec::new();
        for slot in self.slots.iter().filter(|slot| slot.clinician.is_some()) {
            let label = slot.clinician_label();
            match counts.iter_mut().find(|(name, _)| name == label) {
                Some((_, lanes)) => lanes.push(slot.lane),
                None => counts.push((label.to_string(), vec![slot.lane])),
            }
        }
        counts
            .into_iter()
            .map(|(name, lanes)| (name, lanes_used(&lanes)))
            .collect()
    }

    pub fn lane_table(&self) -> ReportTable {
        let mut table = ReportTable::new(["medico", "slots"]);
        for (clinician, lanes) in self.lane_counts() {
            table.push_row(vec![clinician, lanes.to_string()]);
        }
        table
    }

    pub fn chart(&self) -> TimelineChart {
        let mut chart = TimelineChart::new(TITLE, "Hora", "Médico");
        chart.bars = self
            .slots
            .iter()
            .map(|slot| TimelineBar {
                row_label: slot.row_label(),
                start: slot.start,
                end: slot.end,
                group: "atencion".to_string(),
                hover: vec![("ingreso".to_string(), slot.admission_id.clone())],
            })
            .collect();
        chart
    }
}
