pub mod reporting;
pub mod services;

// Re-export key types for convenience
pub use reporting::{build_portfolio, build_report, ReportOptions};
pub use services::ReportService;
