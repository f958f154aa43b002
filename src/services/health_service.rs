use crate::config::HealthConfig;
use crate::services::submission::notifier::Notifier;
use crate::services::submission::store::RecordStore;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("contact-relay");
        Self {
            status: meter
                .i64_gauge("contact_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn RecordStore>,
    notifier: Arc<dyn Notifier>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, notifier: Arc<dyn Notifier>, config: HealthConfig) -> Self {
        Self { store, notifier, config, metrics: Metrics::new() }
    }

    /// Checks record store connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if the store is unreachable.
    pub async fn check_db(&self) -> Result<(), String> {
        let db_timeout = Duration::from_millis(self.config.db_timeout_ms);

        let res = match timeout(db_timeout, self.store.ping()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("Database connection failed: {e}")),
            Err(_) => Err("Database connection timed out".to_string()),
        };
        self.record("database", res.is_ok());
        res
    }

    /// Checks email provider connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if the provider is unreachable.
    pub async fn check_email(&self) -> Result<(), String> {
        let email_timeout = Duration::from_millis(self.config.email_timeout_ms);

        let res = match timeout(email_timeout, self.notifier.ping()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("Email provider check failed: {e}")),
            Err(_) => Err("Email provider check timed out".to_string()),
        };
        self.record("email", res.is_ok());
        res
    }

    fn record(&self, component: &'static str, ok: bool) {
        self.metrics.status.record(i64::from(ok), &[KeyValue::new("component", component)]);
    }
}
