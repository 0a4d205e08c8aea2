use haven_models::v0::Comment;
use haven_result::Result;
use iso8601_timestamp::Timestamp;

use crate::ReferenceDb;
use crate::Report;

use super::AbstractReports;

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "report"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports, newest first
    async fn fetch_reports(&self) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        let mut reports: Vec<Report> = reports.values().cloned().collect();

        // Most recent insertion first; the stable sort keeps that order for
        // reports sharing a creation timestamp.
        reports.reverse();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(reports)
    }

    /// Atomically increment a report's like counter by one
    async fn like_report(&self, id: &str) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.likes += 1;
            report.updated_at = Timestamp::now_utc();
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Atomically append a comment to a report
    async fn comment_report(&self, id: &str, comment: &Comment) -> Result<Report> {
        let mut reports = self.reports.lock().await;
        if let Some(report) = reports.get_mut(id) {
            report.comments.push(comment.clone());
            report.updated_at = comment.created_at;
            Ok(report.clone())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
