//! Report generation and download.

use tracing::info;

use crate::access::require_admin;
use crate::error::HrisResult;
use crate::export::{ExportSource, report_download};
use crate::models::{ReportConfig, ReportDownload, ReportFormat, ReportType, User};

use super::{HrService, short_id};

impl HrService {
    /// Recent reports, most recent first (admin only).
    pub async fn recent_reports(&self, user: &User) -> HrisResult<Vec<ReportConfig>> {
        require_admin(user, "view reports")?;
        let state = self.read().await;
        Ok(state.reports.all().to_vec())
    }

    /// Records a new report dated today (admin only).
    pub async fn generate_report(
        &self,
        user: &User,
        report_type: ReportType,
        format: ReportFormat,
    ) -> HrisResult<ReportConfig> {
        require_admin(user, "generate report")?;
        let mut state = self.write().await;

        let report = ReportConfig {
            id: short_id(),
            name: format!("New {} Report", report_type.title()),
            report_type,
            generated_on: self.clock.today(),
            format,
        };
        state.reports.prepend(report.clone());

        info!(report_id = %report.id, format = format.as_str(), "report generated");
        Ok(report)
    }

    /// Renders a report's records for download (admin only).
    pub async fn download_report(&self, user: &User, id: &str) -> HrisResult<ReportDownload> {
        require_admin(user, "download report")?;
        let state = self.read().await;

        let report = state.reports.find(id)?;
        let source = ExportSource {
            employees: state.employees.all(),
            attendance: state.attendance.all(),
            leave_requests: state.leave_requests.all(),
            payroll: state.payroll.all(),
        };
        report_download(report, &source)
    }
}
