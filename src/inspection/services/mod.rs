//! Application services for store inspections.

mod inspection;
mod report;

pub use inspection::{InspectionService, InspectionServiceError, InspectionServiceResult};
pub use report::{InspectionReport, ReportError, build_report, render_csv, report_file_name};
