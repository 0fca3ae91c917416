//! Presentation helpers: number formatting and labelled reports.

pub mod format;
pub mod report;

pub use format::{format_currency, format_multiple, format_number, format_percent};
pub use report::{AllocationReport, ReportRow};
