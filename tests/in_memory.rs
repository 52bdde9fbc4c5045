//! In-memory integration tests over the demo fixture.
//!
//! Tests are organized into modules by functionality:
//! - `task_workflow_tests`: Approval, reassignment, and status reports
//! - `inspection_flow_tests`: Store inspections feeding visit outcomes
//! - `catalog_tests`: Nearest-location assignment and AMC alerts

mod in_memory {
    pub mod helpers;

    mod catalog_tests;
    mod inspection_flow_tests;
    mod task_workflow_tests;
}
