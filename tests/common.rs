#![allow(dead_code)]
use async_trait::async_trait;
use contact_relay::AppBuilder;
use contact_relay::api::{self, MgmtState};
use contact_relay::config::{Config, ContactConfig};
use contact_relay::domain::notification::NotificationRequest;
use contact_relay::domain::record::ContactRecord;
use contact_relay::services::submission::notifier::{Notifier, NotifyError};
use contact_relay::services::submission::store::{RecordStore, StoreError};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("contact_relay=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

#[derive(Debug, Default)]
pub struct RecordingStore {
    pub fail_put: bool,
    pub fail_ping: bool,
    pub calls: CallLog,
    pub records: Mutex<Vec<(String, ContactRecord)>>,
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn put(&self, target: &str, record: &ContactRecord) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push("store.put");
        if self.fail_put {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.records.lock().unwrap().push((target.to_string(), record.clone()));
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_ping {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub fail_send: bool,
    pub fail_ping: bool,
    pub calls: CallLog,
    pub sent: Mutex<Vec<NotificationRequest>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push("notifier.send");
        if self.fail_send {
            return Err(NotifyError::Provider("connection reset by peer".into()));
        }
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), NotifyError> {
        if self.fail_ping {
            return Err(NotifyError::Provider("unreachable".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Faults {
    pub store_put: bool,
    pub store_ping: bool,
    pub notifier_send: bool,
    pub notifier_ping: bool,
}

pub fn get_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.server.mgmt_port = 0;
    config.contact = ContactConfig {
        store_target: Some("contact_messages".to_string()),
        sender_address: Some("ops@example.com".to_string()),
    };
    config.health.db_timeout_ms = 500;
    config.health.email_timeout_ms = 500;
    config
}

pub struct TestApp {
    pub url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub store: Arc<RecordingStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub calls: CallLog,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(get_test_config(), Faults::default()).await
    }

    pub async fn spawn_with(config: Config, faults: Faults) -> Self {
        setup_tracing();

        let calls = CallLog::default();
        let store = Arc::new(RecordingStore {
            fail_put: faults.store_put,
            fail_ping: faults.store_ping,
            calls: Arc::clone(&calls),
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier {
            fail_send: faults.notifier_send,
            fail_ping: faults.notifier_ping,
            calls: Arc::clone(&calls),
            ..Default::default()
        });

        let services = AppBuilder::new(config.clone())
            .with_store(Arc::clone(&store) as Arc<dyn RecordStore>)
            .with_notifier(Arc::clone(&notifier) as Arc<dyn Notifier>)
            .build()
            .unwrap();

        let app_router = api::app_router(&config, services.submission_service);
        let mgmt_router = api::mgmt_router(MgmtState { health_service: services.health_service });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_addr = mgmt_listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app_router).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            mgmt_url: format!("http://{mgmt_addr}"),
            client: reqwest::Client::new(),
            store,
            notifier,
            calls,
        }
    }

    pub async fn submit(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/contact", self.url))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}
