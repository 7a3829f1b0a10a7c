use std::collections::HashMap;

use clinica_parser::{Admission, ProgressNote};

/// An admission paired with the latest progress note written for it, if any.
#[derive(Debug, Clone, Copy)]
pub struct JoinedAdmission<'a> {
    pub admission: &'a Admission,
    pub latest_note: Option<&'a ProgressNote>,
}

/// Latest note per admission identifier.
///
/// A note without a timestamp never replaces a dated one. Among notes sharing the
/// latest timestamp, the one appearing last in the extract wins.
pub fn latest_notes<'a, I>(notes: I) -> HashMap<&'a str, &'a ProgressNote>
where
    I: IntoIterator<Item = &'a ProgressNote>,
{
    let mut latest: HashMap<&'a str, &'a ProgressNote> = HashMap::new();
    for note in notes {
        latest
            .entry(note.admission_id.as_str())
            .and_modify(|current| {
                if note.noted_at >= current.noted_at {
                    *current = note;
                }
            })
            .or_insert(note);
    }
    latest
}

/// Left join of admissions onto their latest note, preserving admission order.
pub fn join_latest<'a, A, N>(admissions: A, notes: N) -> Vec<JoinedAdmission<'a>>
where
    A: IntoIterator<Item = &'a Admission>,
    N: IntoIterator<Item = &'a ProgressNote>,
{
    let latest = latest_notes(notes);
    admissions
        .into_iter()
        .map(|admission| JoinedAdmission {
            admission,
            latest_note: latest.get(admission.admission_id.as_str()).copied(),
        })
        .collect()
}
