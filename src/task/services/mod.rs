//! Application services for the maintenance task workflow.

mod workflow;

pub use workflow::{
    DATE_FORMAT, ReassignTaskRequest, ReportStatusRequest, ScheduleVisitRequest,
    TaskWorkflowError, TaskWorkflowResult, TaskWorkflowService, parse_visit_date,
};
