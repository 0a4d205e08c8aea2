use iso8601_timestamp::Timestamp;

auto_derived!(
    /// Status of an incident report
    pub enum ReportStatus {
        /// Report is waiting for triage
        Pending,

        /// Report is being looked into by a coordinator
        Investigating,

        /// Report was actioned and resolved
        Resolved,
    }

    /// Comment left on an incident report
    pub struct Comment {
        /// Display name of the commenter
        pub author_label: String,
        /// Comment text
        pub text: String,
        /// Whether this comment was left by an official partner
        /// (police desk, legal aid, medical dispatch)
        #[serde(skip_serializing_if = "crate::if_false", default)]
        pub is_official: bool,
        /// When this comment was left
        #[cfg_attr(feature = "schemas", schemars(with = "String"))]
        pub created_at: Timestamp,
    }
);

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Pending
    }
}
