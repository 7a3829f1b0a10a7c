pub mod anonymize;
pub mod chart;
pub mod config;
pub mod error;
pub mod join;
pub mod lanes;
pub mod metrics;
pub mod reports;
pub mod table;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
