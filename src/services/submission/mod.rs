use crate::config::ContactConfig;
use crate::domain::notification::NotificationRequest;
use crate::domain::record::ContactRecord;
use crate::domain::submission::Submission;
use crate::error::{AppError, Result};
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

pub mod notifier;
pub mod store;

use notifier::Notifier;
use store::RecordStore;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub submissions: Counter<u64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("contact-relay");
        Self {
            submissions: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact form submissions by outcome")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a submission through validation, persistence and notification, in that order.
///
/// The store and notifier are built once per process and shared read-only across
/// requests; each call is otherwise independent.
#[derive(Clone, Debug)]
pub struct SubmissionService {
    config: ContactConfig,
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    metrics: Metrics,
}

impl SubmissionService {
    #[must_use]
    pub fn new(config: ContactConfig, store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, store, notifier, metrics: Metrics::new() }
    }

    /// Handles one raw contact form body.
    ///
    /// Nothing is retried. A failed store write stops the pipeline before any email is
    /// sent. A failed email does not undo the stored record.
    ///
    /// # Errors
    /// Returns `AppError::Configuration` if the store target or sender address is unset.
    /// Returns `AppError::Validation` if the body is not a valid submission.
    /// Returns `AppError::Persistence` if the record could not be stored.
    /// Returns `AppError::Notification` if the operator email could not be sent.
    #[tracing::instrument(skip_all, fields(message_id = tracing::field::Empty))]
    pub async fn submit(&self, raw: &[u8]) -> Result<ContactRecord> {
        let result = self.run(raw).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        self.metrics.submissions.add(1, &[KeyValue::new("outcome", outcome)]);

        result
    }

    async fn run(&self, raw: &[u8]) -> Result<ContactRecord> {
        let target = required(self.config.store_target.as_deref(), "store_target")?;
        let sender = required(self.config.sender_address.as_deref(), "sender_address")?;

        let submission = Submission::parse(raw)?;

        let record = ContactRecord::new(submission);
        tracing::Span::current().record("message_id", tracing::field::display(&record.message_id));

        self.store.put(target, &record).await?;
        tracing::debug!(table = %target, created_at = %record.created_at_iso(), "Submission stored");

        let request = NotificationRequest::for_operator(&record, sender);
        self.notifier.send(&request).await?;
        tracing::info!("Submission stored and operator notified");

        Ok(record)
    }
}

fn required<'a>(value: Option<&'a str>, setting: &'static str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Configuration(setting)),
    }
}
