pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::ParserError;
pub use formats::{decode_latin1, AdmissionsParser, ProgressNotesParser};
pub use model::{Admission, ExtractKind, ProgressNote};
pub use registry::{load_admissions, load_extract, load_progress_notes, ExtractParser};
