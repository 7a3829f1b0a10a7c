mod admissions;
mod common;
mod progress_notes;
pub(crate) mod schema;

pub use admissions::AdmissionsParser;
pub use common::decode_latin1;
pub use progress_notes::ProgressNotesParser;

pub(crate) use common::{read_tsv, ColumnIndex, ExtractRow};
