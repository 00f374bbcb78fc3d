//! # Newsletter & contact mail
//!
//! Outbound mail flows: a contact-form notification to the administrator
//! address, and a best-effort batched broadcast to every active subscriber.
//! Per-recipient failures never abort the batch; they are counted and the
//! first few messages are reported back.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use domains::ports::{Mailer, OutboundEmail, SubscriberRepo};
use domains::{DomainError, DomainResult};

/// Recipients per batch.
const BATCH_SIZE: usize = 50;
/// Pause between batches, keeping the mail API comfortable.
const BATCH_DELAY: Duration = Duration::from_secs(1);
/// How many failure messages the report carries.
const REPORTED_ERRORS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastReport {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    pub errors: Vec<String>,
}

#[derive(Clone)]
pub struct NewsletterService {
    subscribers: Arc<dyn SubscriberRepo>,
    mailer: Arc<dyn Mailer>,
    /// Fixed administrator inbox for contact-form notifications.
    admin_email: String,
    batch_delay: Duration,
}

impl NewsletterService {
    pub fn new(
        subscribers: Arc<dyn SubscriberRepo>,
        mailer: Arc<dyn Mailer>,
        admin_email: String,
    ) -> Self {
        Self {
            subscribers,
            mailer,
            admin_email,
            batch_delay: BATCH_DELAY,
        }
    }

    /// Test constructor without the inter-batch pause.
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Contact-form submission: all four fields are required; the message is
    /// forwarded to the administrator address.
    pub async fn contact(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> DomainResult<()> {
        if [name, email, subject, message]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(DomainError::Validation("Missing required fields".into()));
        }
        let mail = OutboundEmail {
            to: self.admin_email.clone(),
            subject: format!("[Contact] {}", subject.trim()),
            text: format!("From: {} <{}>\n\n{}", name.trim(), email.trim(), message.trim()),
            html: None,
        };
        self.mailer.send(&mail).await?;
        tracing::info!(from = %email.trim(), "contact message forwarded");
        Ok(())
    }

    /// Batched broadcast to all active subscribers. Failures are tolerated
    /// per recipient and aggregated into the report.
    pub async fn broadcast(
        &self,
        subject: &str,
        content: &str,
        html: Option<&str>,
    ) -> DomainResult<BroadcastReport> {
        if subject.trim().is_empty() || content.trim().is_empty() {
            return Err(DomainError::Validation(
                "Missing subject or content".into(),
            ));
        }

        let recipients = self.subscribers.active().await?;
        if recipients.is_empty() {
            return Err(DomainError::Validation(
                "No active subscribers found".into(),
            ));
        }

        let total = recipients.len();
        let mut sent = 0usize;
        let mut failed = 0usize;
        let mut errors = Vec::new();

        let batches: Vec<_> = recipients.chunks(BATCH_SIZE).collect();
        let last_batch = batches.len() - 1;
        for (index, batch) in batches.into_iter().enumerate() {
            for subscriber in batch {
                let mail = OutboundEmail {
                    to: subscriber.email.clone(),
                    subject: subject.trim().to_string(),
                    text: content.to_string(),
                    html: html.map(str::to_string),
                };
                match self.mailer.send(&mail).await {
                    Ok(()) => sent += 1,
                    // Missing API key is a configuration problem, not a
                    // per-recipient failure: abort and surface it.
                    Err(DomainError::NotConfigured(what)) => {
                        return Err(DomainError::NotConfigured(what))
                    }
                    Err(err) => {
                        failed += 1;
                        if errors.len() < REPORTED_ERRORS {
                            errors.push(format!("{}: {err}", subscriber.email));
                        }
                        tracing::warn!(to = %subscriber.email, %err, "newsletter send failed");
                    }
                }
            }
            if index != last_batch {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        tracing::info!(sent, failed, total, "newsletter broadcast finished");
        Ok(BroadcastReport {
            sent,
            failed,
            total,
            errors,
        })
    }
}
