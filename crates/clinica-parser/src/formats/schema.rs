//! Column names of the two extracts, as exported by the clinic's information system.

pub const ADMISSION_ID: &str = "ingreso";
pub const ADMISSION_DEPARTMENT: &str = "departamento_ingreso";
pub const PATIENT_NAME: &str = "nombre_paciente";
pub const ADMITTED_AT: &str = "fechaingreso";
pub const CONSULTATION_AT: &str = "fecha_consulta";
pub const CLOSED_AT: &str = "fechacierre_ingreso";
pub const CLINICIAN: &str = "medico";
pub const PLAN_DESCRIPTION: &str = "plan_descripcion";
pub const PATIENT_STATUS: &str = "estado_del_paciente";

pub const SPECIALTY: &str = "especialidad";
pub const NOTE_DEPARTMENT: &str = "departamento";
pub const NOTED_AT: &str = "fecha_evolucion";

pub const REQUIRED_ADMISSION_COLUMNS: &[&str] = &[
    ADMISSION_ID,
    ADMISSION_DEPARTMENT,
    ADMITTED_AT,
    CONSULTATION_AT,
    CLINICIAN,
];

pub const REQUIRED_NOTE_COLUMNS: &[&str] = &[ADMISSION_ID, CLINICIAN, NOTED_AT];
