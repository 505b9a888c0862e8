//! Application services

mod report;

pub use report::ReportService;
