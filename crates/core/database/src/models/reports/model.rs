use haven_models::v0::{Comment, ReportStatus};
use haven_result::Result;
use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::Database;

/// Display name recorded when the submitter stays anonymous
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

auto_derived!(
    /// User-submitted incident report
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Display name of the submitter
        pub author_label: String,
        /// What happened
        pub description: String,
        /// Locality the incident occurred in
        pub region: String,
        /// Status of the report
        #[serde(default)]
        pub status: ReportStatus,
        /// Reference to uploaded evidence, if any was attached
        #[serde(skip_serializing_if = "Option::is_none")]
        pub evidence_ref: Option<String>,
        /// Number of likes this report has received
        #[serde(default)]
        pub likes: u32,
        /// Comments left on this report
        #[serde(default)]
        pub comments: Vec<Comment>,
        /// When this report was submitted
        #[cfg_attr(feature = "schemas", schemars(with = "String"))]
        pub created_at: Timestamp,
        /// When this report was last changed
        #[cfg_attr(feature = "schemas", schemars(with = "String"))]
        pub updated_at: Timestamp,
    }
);

impl Report {
    /// Create a new report
    ///
    /// An omitted or blank author label falls back to the anonymous
    /// placeholder; empty required fields are rejected before anything is
    /// written.
    pub async fn create(
        db: &Database,
        author_label: Option<String>,
        description: String,
        region: String,
        evidence_ref: Option<String>,
    ) -> Result<Report> {
        if description.trim().is_empty() {
            return Err(create_error!(FailedValidation {
                error: "description must not be empty".to_string()
            }));
        }

        if region.trim().is_empty() {
            return Err(create_error!(FailedValidation {
                error: "region must not be empty".to_string()
            }));
        }

        let now = Timestamp::now_utc();
        let report = Report {
            id: Ulid::new().to_string(),
            author_label: author_label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            description,
            region,
            status: ReportStatus::Pending,
            evidence_ref,
            likes: 0,
            comments: vec![],
            created_at: now,
            updated_at: now,
        };

        db.insert_report(&report).await?;
        Ok(report)
    }

    /// Append a comment to the given report, stamping it with the current time
    pub async fn comment(
        db: &Database,
        id: &str,
        author_label: String,
        text: String,
        is_official: bool,
    ) -> Result<Report> {
        if text.trim().is_empty() {
            return Err(create_error!(FailedValidation {
                error: "text must not be empty".to_string()
            }));
        }

        let comment = Comment {
            author_label,
            text,
            is_official,
            created_at: Timestamp::now_utc(),
        };

        db.comment_report(id, &comment).await
    }
}
