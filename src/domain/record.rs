use crate::domain::submission::Submission;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// The persisted form of a submission. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub message_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl ContactRecord {
    /// Stamps a submission with a fresh identifier and the current time.
    ///
    /// Identifiers are UUID v7: ordered by creation time, with enough randomness that
    /// submissions landing in the same millisecond still get distinct ids.
    #[must_use]
    pub fn new(submission: Submission) -> Self {
        Self::at(submission, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn at(submission: Submission, created_at: OffsetDateTime) -> Self {
        Self {
            message_id: Uuid::now_v7().to_string(),
            name: submission.name,
            email: submission.email,
            message: submission.message,
            created_at,
        }
    }

    /// `created_at` as an ISO-8601 (RFC 3339) string.
    #[must_use]
    pub fn created_at_iso(&self) -> String {
        self.created_at.format(&Rfc3339).unwrap_or_else(|_| self.created_at.unix_timestamp().to_string())
    }
}
