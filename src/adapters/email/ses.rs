use crate::domain::notification::NotificationRequest;
use crate::services::submission::notifier::{Notifier, NotifyError};
use async_trait::async_trait;
use aws_sdk_sesv2::Client;
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::operation::send_email::SendEmailError;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

const CHARSET: &str = "UTF-8";

#[derive(Clone, Debug)]
pub struct SesNotifier {
    client: Client,
}

impl SesNotifier {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

fn content(data: &str) -> Result<Content, NotifyError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| NotifyError::Provider(format!("Failed to build email content: {e}")))
}

fn email_content(request: &NotificationRequest) -> Result<EmailContent, NotifyError> {
    let body = Body::builder().text(content(&request.body_text)?).html(content(&request.body_html)?).build();
    let message = Message::builder().subject(content(&request.subject)?).body(body).build();
    Ok(EmailContent::builder().simple(message).build())
}

#[async_trait]
impl Notifier for SesNotifier {
    #[tracing::instrument(level = "debug", skip(self, request))]
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotifyError> {
        let destination = Destination::builder().to_addresses(&request.destination).build();

        let output = self
            .client
            .send_email()
            .from_email_address(&request.source)
            .destination(destination)
            .content(email_content(request)?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %DisplayErrorContext(&e), "SES SendEmail failed");
                match e.as_service_error() {
                    Some(SendEmailError::MessageRejected(rejected)) => {
                        NotifyError::Rejected(rejected.message().unwrap_or("message rejected").to_string())
                    }
                    _ => NotifyError::Provider(DisplayErrorContext(&e).to_string()),
                }
            })?;

        tracing::debug!(ses_message_id = ?output.message_id(), "SES accepted notification");
        Ok(())
    }

    async fn ping(&self) -> Result<(), NotifyError> {
        self.client
            .get_account()
            .send()
            .await
            .map_err(|e| NotifyError::Provider(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
