use clinica_core::anonymize::ClinicianPseudonyms;

#[test]
fn pseudonyms_follow_first_appearance() {
    let names = [Some("ROJAS"), Some("PEÑA"), None, Some("ROJAS"), Some("DIAZ")];
    let pseudonyms = ClinicianPseudonyms::build("PEÑA", names);

    assert_eq!(pseudonyms.len(), 2);
    assert_eq!(pseudonyms.rename(Some("ROJAS")).as_deref(), Some("medico1"));
    assert_eq!(pseudonyms.rename(Some("DIAZ")).as_deref(), Some("medico2"));
    assert_eq!(pseudonyms.rename(Some("PEÑA")).as_deref(), Some("PEÑA"));
    assert_eq!(pseudonyms.rename(None), None);
}

#[test]
fn unknown_names_pass_through() {
    let pseudonyms = ClinicianPseudonyms::build("X", [Some("A")]);
    assert_eq!(pseudonyms.rename(Some("B")).as_deref(), Some("B"));
    assert_eq!(pseudonyms.pseudonym("A"), Some("medico1"));
    assert!(!pseudonyms.is_empty());
}
