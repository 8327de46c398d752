use async_trait::async_trait;
use std::sync::Arc;

use super::content::EmailContent;
use super::dispatch::NotificationRequest;
use super::links::AppLinks;
use crate::Result;

/// Delivers rendered emails (SMTP, an email API, a test double...).
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, from: &str, to: &str, email: &EmailContent) -> Result<()>;
}

/// Writes emails to the log instead of delivering them. Used when no mail
/// provider is configured. Links carry confirmation tokens and are never logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl LogTransport {
    fn summary(from: &str, to: &str, email: &EmailContent) -> String {
        format!("{from} -> {to}: {} ({})", email.subject(), email.title())
    }
}

#[async_trait]
impl MailTransport for LogTransport {
    async fn send(&self, from: &str, to: &str, email: &EmailContent) -> Result<()> {
        tracing::info!("email not delivered: {}", Self::summary(from, to, email));
        Ok(())
    }
}

/// Renders notification requests and hands them to a transport.
pub struct Notifier<T> {
    links: AppLinks,
    from: String,
    transport: Arc<T>,
}

impl<T> Clone for Notifier<T> {
    fn clone(&self) -> Self {
        Self { links: self.links.clone(), from: self.from.clone(), transport: Arc::clone(&self.transport) }
    }
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(links: AppLinks, from: impl Into<String>, transport: T) -> Self {
        Self { links, from: from.into(), transport: Arc::new(transport) }
    }

    pub fn transport(&self) -> &T { &self.transport }

    #[tracing::instrument(skip(self, request), fields(event = request.event.name()))]
    pub async fn notify(&self, request: &NotificationRequest) -> Result<EmailContent> {
        let email = request.event.render(&self.links);
        self.transport.send(&self.from, &request.to, &email).await?;
        tracing::debug!(title = email.title(), "notification sent");
        Ok(email)
    }

    /// Decodes a JSON request off the bus and sends it.
    pub async fn notify_json(&self, payload: &[u8]) -> Result<EmailContent> {
        let request: NotificationRequest = serde_json::from_slice(payload)?;
        self.notify(&request).await
    }
}
