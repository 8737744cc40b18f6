//! Library side of the `define-inspect` command.

pub mod filter;
pub mod input;
pub mod logging;
pub mod report;

pub use filter::NameFilter;
pub use input::load_document;
pub use report::{CodeReports, ExternalCodes, Report, ReportOptions};
