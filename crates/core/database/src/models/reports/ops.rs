use haven_models::v0::Comment;
use haven_result::Result;

use crate::Report;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch all reports, newest first
    async fn fetch_reports(&self) -> Result<Vec<Report>>;

    /// Atomically increment a report's like counter by one
    async fn like_report(&self, id: &str) -> Result<()>;

    /// Atomically append a comment to a report
    async fn comment_report(&self, id: &str, comment: &Comment) -> Result<Report>;
}
