//! Report metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The data set a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Employee directory.
    Employee,
    /// Attendance records.
    Attendance,
    /// Payroll records.
    Payroll,
    /// Leave requests.
    Leave,
}

impl ReportType {
    /// Capitalised name used in report titles.
    pub fn title(&self) -> &'static str {
        match self {
            ReportType::Employee => "Employee",
            ReportType::Attendance => "Attendance",
            ReportType::Payroll => "Payroll",
            ReportType::Leave => "Leave",
        }
    }
}

/// Output format of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Portable Document Format.
    Pdf,
    /// Comma-separated values.
    Csv,
}

impl ReportFormat {
    /// Lower-case name, also used as file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Csv => "csv",
        }
    }
}

/// A generated report entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Unique identifier for the report.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The data set covered.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// The date the report was generated.
    pub generated_on: NaiveDate,
    /// Output format.
    pub format: ReportFormat,
}

/// A rendered report ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDownload {
    /// Suggested file name, e.g. "report-abc.csv".
    pub file_name: String,
    /// MIME type of `body`.
    pub content_type: String,
    /// Rendered report content.
    pub body: String,
}

impl crate::store::Record for ReportConfig {
    const ENTITY: &'static str = "Report";

    fn id(&self) -> &str {
        &self.id
    }
}
