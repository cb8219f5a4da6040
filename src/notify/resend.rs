use crate::error::NotifyError;
use crate::notify::{ContactMessage, Mailer};
use crate::notify::models::{SendEmailRequest, SendEmailResponse};
use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub struct ResendClient {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendClient {
    pub fn new(api_key: &str, from: &str, to: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://api.resend.com".to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

impl Mailer for ResendClient {
    fn send(&self, message: &ContactMessage) -> Result<String> {
        let url = format!("{}/emails", self.base_url);

        let body = SendEmailRequest {
            from: &self.from,
            to: vec![self.to.as_str()],
            subject: message.subject(),
            reply_to: &message.email,
            text: message.body(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("Failed to send request to Resend")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                detail,
            }
            .into());
        }

        let sent = response
            .json::<SendEmailResponse>()
            .context("Failed to parse Resend response")?;

        Ok(sent.id)
    }
}
