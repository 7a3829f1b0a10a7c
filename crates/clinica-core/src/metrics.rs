use chrono::{Duration, NaiveDateTime};

use crate::error::{ReportError, Result};

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Minutes elapsed from `from` to `to`, fractional and possibly negative.
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_MINUTE
}

/// Consultation start minus admission time.
pub fn wait_minutes(
    admitted_at: Option<NaiveDateTime>,
    consultation_at: Option<NaiveDateTime>,
) -> Option<f64> {
    Some(minutes_between(admitted_at?, consultation_at?))
}

/// Latest progress note minus consultation start.
pub fn consultation_minutes(
    consultation_at: Option<NaiveDateTime>,
    last_note_at: Option<NaiveDateTime>,
) -> Option<f64> {
    Some(minutes_between(consultation_at?, last_note_at?))
}

/// End of an attention interval; falls back to `start + default_minutes` without a note.
pub fn attention_end(
    start: NaiveDateTime,
    last_note_at: Option<NaiveDateTime>,
    default_minutes: i64,
) -> Result<NaiveDateTime> {
    if let Some(end) = last_note_at {
        return Ok(end);
    }
    Duration::try_minutes(default_minutes)
        .and_then(|length| start.checked_add_signed(length))
        .ok_or_else(|| {
            ReportError::Config(format!(
                "default attention of {default_minutes} minutes from {start} is out of range"
            ))
        })
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
