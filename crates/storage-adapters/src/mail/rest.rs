//! # REST mailer
//!
//! Transactional email over a JSON HTTP API. A missing API key yields the
//! distinct `NotConfigured` error so the newsletter endpoint can answer
//! "mailer is not configured" instead of a generic failure.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use domains::ports::{Mailer, OutboundEmail};
use domains::{DomainError, DomainResult};

pub struct RestMailer {
    http: reqwest::Client,
    endpoint: String,
    from: String,
    api_key: Option<SecretString>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

impl RestMailer {
    pub fn new(endpoint: String, from: String, api_key: Option<SecretString>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            from,
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for RestMailer {
    async fn send(&self, mail: &OutboundEmail) -> DomainResult<()> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(DomainError::NotConfigured("mailer"))?;

        let request = SendRequest {
            from: &self.from,
            to: [mail.to.as_str()],
            subject: &mail.subject,
            text: &mail.text,
            html: mail.html.as_deref(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| DomainError::Internal(format!("mail transport: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, to = %mail.to, "mail API rejected send");
            return Err(DomainError::Internal(format!(
                "mail API returned {status}: {body}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let mailer = RestMailer::new(
            "https://mail.invalid/send".into(),
            "news@hromada.org".into(),
            None,
        );
        let res = mailer
            .send(&OutboundEmail {
                to: "someone@example.com".into(),
                subject: "hi".into(),
                text: "hi".into(),
                html: None,
            })
            .await;
        assert_eq!(res, Err(DomainError::NotConfigured("mailer")));
    }
}
