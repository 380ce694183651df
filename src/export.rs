//! CSV rendering of the records behind a report.

use csv::Writer;

use crate::error::{HrisError, HrisResult};
use crate::models::{
    AttendanceRecord, Employee, LeaveRequest, PayrollRecord, ReportConfig, ReportDownload,
    ReportFormat, ReportType,
};

/// The records a report can be rendered from.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    /// Employee directory.
    pub employees: &'a [Employee],
    /// Attendance records.
    pub attendance: &'a [AttendanceRecord],
    /// Leave requests.
    pub leave_requests: &'a [LeaveRequest],
    /// Payroll records.
    pub payroll: &'a [PayrollRecord],
}

fn export_error(e: impl std::fmt::Display) -> HrisError {
    HrisError::Export {
        message: e.to_string(),
    }
}

fn optional<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Renders the records of `report_type` as CSV with a header row.
pub fn render_csv(report_type: ReportType, source: &ExportSource<'_>) -> HrisResult<String> {
    let mut wtr = Writer::from_writer(Vec::new());

    match report_type {
        ReportType::Employee => {
            wtr.write_record([
                "id",
                "first_name",
                "last_name",
                "email",
                "position",
                "department",
                "status",
                "join_date",
                "phone",
            ])
            .map_err(export_error)?;
            for e in source.employees {
                wtr.write_record([
                    e.id.clone(),
                    e.first_name.clone(),
                    e.last_name.clone(),
                    e.email.clone(),
                    e.position.clone(),
                    e.department.clone(),
                    e.status.as_str().to_string(),
                    e.join_date.to_string(),
                    e.phone.clone(),
                ])
                .map_err(export_error)?;
            }
        }
        ReportType::Attendance => {
            wtr.write_record([
                "id",
                "employee_id",
                "employee_name",
                "date",
                "check_in",
                "check_out",
                "status",
                "total_hours",
            ])
            .map_err(export_error)?;
            for r in source.attendance {
                wtr.write_record([
                    r.id.clone(),
                    r.employee_id.clone(),
                    r.employee_name.clone(),
                    r.date.to_string(),
                    r.check_in.format("%H:%M").to_string(),
                    optional(&r.check_out.map(|t| t.format("%H:%M"))),
                    r.status.as_str().to_string(),
                    optional(&r.total_hours),
                ])
                .map_err(export_error)?;
            }
        }
        ReportType::Leave => {
            wtr.write_record([
                "id",
                "employee_id",
                "employee_name",
                "type",
                "start_date",
                "end_date",
                "reason",
                "status",
                "applied_on",
            ])
            .map_err(export_error)?;
            for r in source.leave_requests {
                wtr.write_record([
                    r.id.clone(),
                    r.employee_id.clone(),
                    r.employee_name.clone(),
                    r.leave_type.as_str().to_string(),
                    r.start_date.to_string(),
                    r.end_date.to_string(),
                    r.reason.clone(),
                    r.status.as_str().to_string(),
                    r.applied_on.to_string(),
                ])
                .map_err(export_error)?;
            }
        }
        ReportType::Payroll => {
            wtr.write_record([
                "id",
                "employee_id",
                "employee_name",
                "period",
                "basic_salary",
                "allowances",
                "deductions",
                "net_salary",
                "status",
                "payment_date",
            ])
            .map_err(export_error)?;
            for r in source.payroll {
                wtr.write_record([
                    r.id.clone(),
                    r.employee_id.clone(),
                    r.employee_name.clone(),
                    r.period_label(),
                    r.basic_salary.to_string(),
                    r.allowances.to_string(),
                    r.deductions.to_string(),
                    r.net_salary.to_string(),
                    r.status.as_str().to_string(),
                    optional(&r.payment_date),
                ])
                .map_err(export_error)?;
            }
        }
    }

    let bytes = wtr.into_inner().map_err(export_error)?;
    String::from_utf8(bytes).map_err(export_error)
}

/// `Q3 Payroll Summary` becomes `q3-payroll-summary`.
fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let trimmed = stem.trim_matches('-');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders a stored report for download.
///
/// Only CSV reports can be rendered; PDF fails with `UnsupportedFormat`.
pub fn report_download(
    report: &ReportConfig,
    source: &ExportSource<'_>,
) -> HrisResult<ReportDownload> {
    match report.format {
        ReportFormat::Csv => Ok(ReportDownload {
            file_name: format!("{}.csv", file_stem(&report.name)),
            content_type: "text/csv".to_string(),
            body: render_csv(report.report_type, source)?,
        }),
        ReportFormat::Pdf => Err(HrisError::UnsupportedFormat {
            format: report.format.as_str().to_string(),
        }),
    }
}
