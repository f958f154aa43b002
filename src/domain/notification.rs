use crate::domain::record::ContactRecord;

pub const SUBJECT: &str = "New contact message";

/// An operator alert about a new contact message. Built per request and never stored.
///
/// The operator is both sender and recipient; the submitter receives no copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub source: String,
    pub destination: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

impl NotificationRequest {
    #[must_use]
    pub fn for_operator(record: &ContactRecord, operator_address: &str) -> Self {
        let body_text = format!("New message from {} ({}):\n\n{}", record.name, record.email, record.message);
        // Only newlines are translated; the rest of the message is passed through as-is.
        let body_html = format!(
            "<p>New message from <strong>{}</strong> ({}):</p><p>{}</p>",
            record.name,
            record.email,
            record.message.replace('\n', "<br>")
        );

        Self {
            source: operator_address.to_string(),
            destination: operator_address.to_string(),
            subject: SUBJECT.to_string(),
            body_text,
            body_html,
        }
    }
}
