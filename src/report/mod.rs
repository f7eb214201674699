//! Report module - table summaries and the cleaning report export

pub mod cleaning_report;
pub mod summary;

pub use cleaning_report::*;
pub use summary::*;
