#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::database::PgRecordStore;
use crate::adapters::email::{LogNotifier, SesNotifier};
use crate::api::ServiceContainer;
use crate::config::{Config, EmailBackend, EmailConfig};
use crate::services::health_service::HealthService;
use crate::services::submission::SubmissionService;
use crate::services::submission::notifier::Notifier;
use crate::services::submission::store::RecordStore;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use std::sync::Arc;
use tokio::sync::watch;

/// Wires the process-wide collaborators into the services handed to the routers.
///
/// Clients are built once here and shared read-only by every request.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn RecordStore>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None, notifier: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Builds the service container.
    ///
    /// # Errors
    /// Returns an error if the record store or notifier was not provided.
    pub fn build(self) -> anyhow::Result<ServiceContainer> {
        let store = self.store.ok_or_else(|| anyhow::anyhow!("record store is required"))?;
        let notifier = self.notifier.ok_or_else(|| anyhow::anyhow!("notifier is required"))?;

        let submission_service =
            SubmissionService::new(self.config.contact.clone(), Arc::clone(&store), Arc::clone(&notifier));
        let health_service = HealthService::new(store, notifier, self.config.health.clone());

        Ok(ServiceContainer { submission_service, health_service })
    }
}

/// Builds the notifier selected by configuration.
pub async fn initialize_notifier(config: &EmailConfig) -> Arc<dyn Notifier> {
    match config.backend {
        EmailBackend::Ses => Arc::new(SesNotifier::new(initialize_ses_client(config).await)),
        EmailBackend::Log => Arc::new(LogNotifier),
    }
}

async fn initialize_ses_client(config: &EmailConfig) -> aws_sdk_sesv2::Client {
    let region_provider = Region::new(config.region.clone());
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);

    if let (Some(ak), Some(sk)) = (&config.access_key, &config.secret_key) {
        let creds = Credentials::new(ak.clone(), sk.clone(), None, None, "static");
        loader = loader.credentials_provider(creds);
    }

    let sdk_config = loader.load().await;
    let mut ses_config = aws_sdk_sesv2::config::Builder::from(&sdk_config);
    if let Some(endpoint) = &config.endpoint {
        ses_config = ses_config.endpoint_url(endpoint);
    }

    aws_sdk_sesv2::Client::from_conf(ses_config.build())
}

/// Creates the contact table at boot when a target is configured.
///
/// A missing or invalid target only logs a warning: every submission will then fail
/// with a configuration or persistence error, but the process keeps serving probes.
pub async fn prepare_store(store: &PgRecordStore, config: &Config) {
    match config.contact.store_target.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(target) => {
            if let Err(e) = store.ensure_table(target).await {
                tracing::error!(error = %e, table = %target, "Failed to prepare contact table");
            }
        }
        None => tracing::warn!("CONTACT_TABLE_NAME is not set; submissions will be rejected"),
    }

    if config.contact.sender_address.as_deref().is_none_or(|s| s.trim().is_empty()) {
        tracing::warn!("CONTACT_SENDER_EMAIL is not set; submissions will be rejected");
    }
}

pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Unhandled panic");
        default_hook(info);
    }));
}

pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
