use chrono::{NaiveDate, NaiveDateTime};
use clinica_core::reports::build_priority_timeline;
use clinica_core::ReportConfig;
use clinica_parser::{Admission, ProgressNote};

const PRIORITY: &str = "URGENCIAS PRIORITARIA";

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn admission(
    id: &str,
    department: &str,
    patient: &str,
    clinician: Option<&str>,
    consultation: Option<NaiveDateTime>,
) -> Admission {
    let mut admission = Admission::new(id);
    admission.department = Some(department.to_string());
    admission.patient_name = Some(patient.to_string());
    admission.clinician = clinician.map(str::to_string);
    admission.consultation_at = consultation;
    admission.patient_status = Some("ESTABLE".to_string());
    admission
}

fn note(id: &str, specialty: &str, noted_at: Option<NaiveDateTime>) -> ProgressNote {
    let mut note = ProgressNote::new(id, noted_at);
    note.specialty = Some(specialty.to_string());
    note
}

fn fixture() -> (Vec<Admission>, Vec<ProgressNote>) {
    let admissions = vec![
        admission("10", PRIORITY, "ANA", Some("ROJAS"), Some(at(9, 20))),
        admission("11", PRIORITY, "LUIS", Some("ROJAS"), Some(at(9, 40))),
        admission("12", PRIORITY, "EVA", None, Some(at(10, 0))),
        admission(
            "13",
            "URGENCIAS CONSULTORIOS Y PROCEDIMIENTOS",
            "JUAN",
            Some("PEÑA"),
            Some(at(9, 0)),
        ),
    ];
    let notes = vec![
        note("10", "MEDICINA GENERAL", Some(at(9, 30))),
        note("10", "PEDIATRÍA", Some(at(9, 50))),
        note("10", "MEDICINA GENERAL", None),
        note("12", "MEDICINA GENERAL", Some(at(10, 15))),
        note("13", "MEDICINA GENERAL", Some(at(9, 10))),
    ];
    (admissions, notes)
}

#[test]
fn priority_visits_run_from_consultation_to_latest_note() {
    let (admissions, notes) = fixture();
    let timeline = build_priority_timeline(&admissions, &notes, &ReportConfig::default());

    assert_eq!(timeline.visits.len(), 3);

    let first = &timeline.visits[0];
    assert_eq!(first.row_label(), "10 | ANA");
    assert_eq!(first.end, Some(at(9, 50)));
    assert_eq!(first.duration_minutes, Some(30.0));
    assert_eq!(first.specialty.as_deref(), Some("PEDIATRÍA"));

    let without_notes = &timeline.visits[1];
    assert_eq!(without_notes.end, None);
    assert_eq!(without_notes.duration_minutes, None);
}

#[test]
fn priority_chart_colours_by_clinician() {
    let (admissions, notes) = fixture();
    let chart = build_priority_timeline(&admissions, &notes, &ReportConfig::default()).chart();

    assert_eq!(chart.bars.len(), 2);
    assert_eq!(chart.groups(), vec!["ROJAS", "SIN MÉDICO"]);
    assert_eq!(chart.height, Some(800));
    assert_eq!(chart.legend_title.as_deref(), Some("Médico"));
    assert_eq!(
        chart.bars[0].hover,
        vec![
            ("duracion_min".to_string(), "30.00".to_string()),
            ("especialidad".to_string(), "PEDIATRÍA".to_string()),
            ("estado_del_paciente".to_string(), "ESTABLE".to_string()),
        ]
    );

    let figure = chart.figure();
    assert_eq!(figure["data"].as_array().unwrap().len(), 2);
    assert_eq!(figure["data"][0]["x"][0], 1_800_000);
    assert_eq!(figure["data"][0]["base"][0], "2024-03-01 09:20:00");
    assert_eq!(figure["layout"]["height"], 800);
    assert_eq!(figure["layout"]["legend"]["title"]["text"], "Médico");
}

#[test]
fn priority_table_lists_every_visit() {
    let (admissions, notes) = fixture();
    let table = build_priority_timeline(&admissions, &notes, &ReportConfig::default()).table();

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.rows[1],
        vec!["11", "LUIS", "ROJAS", "2024-Mar-01 09:40:00", "", ""]
    );
}

#[test]
fn blank_specialty_on_latest_note_falls_back_to_an_earlier_note() {
    let (admissions, mut notes) = fixture();
    let mut blank = ProgressNote::new("10", Some(at(10, 5)));
    blank.specialty = None;
    notes.push(blank);

    let timeline = build_priority_timeline(&admissions, &notes, &ReportConfig::default());
    let first = &timeline.visits[0];
    assert_eq!(first.end, Some(at(10, 5)));
    assert_eq!(first.duration_minutes, Some(45.0));
    assert_eq!(first.specialty.as_deref(), Some("PEDIATRÍA"));
}
