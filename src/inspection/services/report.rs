//! CSV report of an inspection session.

use crate::inspection::domain::{ChecklistEntry, InspectionSession};
use crate::location::domain::{Appliance, StoreId};
use chrono::{DateTime, SecondsFormat, Utc};
use minijinja::{Environment, context};
use serde::Serialize;
use thiserror::Error;

const REPORT_TEMPLATE: &str = "Appliance Name,Model,Serial Number,Checked,Status,Remarks,Last Updated\
{% for row in rows %}
{{ row.name|csv }},{{ row.model|csv }},{{ row.serial|csv }},{{ row.checked|csv }},\
{{ row.status|csv }},{{ row.remarks|csv }},{{ row.last_updated|csv }}\
{% endfor %}";

/// Errors returned while rendering a report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Template rendering failed.
    #[error("report rendering failed: {0}")]
    Render(String),
}

/// Rendered inspection report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionReport {
    /// Suggested download name.
    pub file_name: String,
    /// CSV body without a trailing newline.
    pub csv: String,
}

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    name: &'a str,
    model: &'a str,
    serial: &'a str,
    checked: &'static str,
    status: &'static str,
    remarks: &'a str,
    last_updated: String,
}

impl<'a> ReportRow<'a> {
    fn new(appliance: &'a Appliance, entry: Option<&'a ChecklistEntry>) -> Self {
        let remarks = entry
            .map(ChecklistEntry::remarks)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("N/A");
        let last_updated = entry
            .and_then(ChecklistEntry::last_updated)
            .map_or_else(
                || "Not inspected".to_owned(),
                |at| at.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        Self {
            name: appliance.name(),
            model: appliance.model(),
            serial: appliance.serial_number(),
            checked: if entry.is_some_and(ChecklistEntry::is_checked) {
                "Yes"
            } else {
                "No"
            },
            status: entry.map_or("pending", |found| found.status().as_str()),
            remarks,
            last_updated,
        }
    }
}

/// Quotes one CSV field, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Returns the download name `store-<id>-report-<unix-millis>.csv`.
#[must_use]
pub fn report_file_name(store_id: StoreId, generated_at: DateTime<Utc>) -> String {
    format!(
        "store-{store_id}-report-{}.csv",
        generated_at.timestamp_millis()
    )
}

/// Renders one CSV row per appliance, in the order given.
///
/// Appliances missing from the session are reported as not inspected.
///
/// # Errors
///
/// Returns [`ReportError::Render`] when template rendering fails.
pub fn render_csv(
    appliances: &[Appliance],
    session: &InspectionSession,
) -> Result<String, ReportError> {
    let rows: Vec<ReportRow<'_>> = appliances
        .iter()
        .map(|appliance| ReportRow::new(appliance, session.entry(appliance.id())))
        .collect();

    let mut environment = Environment::new();
    environment.add_filter("csv", csv_field);
    environment
        .render_str(REPORT_TEMPLATE, context! { rows => rows })
        .map_err(|error| ReportError::Render(error.to_string()))
}

/// Renders the report and its file name.
///
/// # Errors
///
/// Returns [`ReportError::Render`] when template rendering fails.
pub fn build_report(
    appliances: &[Appliance],
    session: &InspectionSession,
    generated_at: DateTime<Utc>,
) -> Result<InspectionReport, ReportError> {
    Ok(InspectionReport {
        file_name: report_file_name(session.store_id(), generated_at),
        csv: render_csv(appliances, session)?,
    })
}
