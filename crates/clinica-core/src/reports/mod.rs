pub mod attention_timeline;
pub mod priority_timeline;
pub mod wait_times;

pub use attention_timeline::{build_attention_timeline, AttentionSlot, AttentionTimeline};
pub use priority_timeline::{build_priority_timeline, PriorityTimeline, PriorityVisit};
pub use wait_times::{build_wait_time_report, ClinicianAverage, WaitTimeReport, WaitTimeRow};

/// Timestamp format used in printed tables, e.g. `2024-Mar-01 08:45:00`.
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%b-%d %H:%M:%S";

/// Row label for admissions without an assigned clinician.
pub const NO_CLINICIAN: &str = "SIN MÉDICO";
