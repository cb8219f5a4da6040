use crate::error::NotifyError;
use crate::notify::MailingList;
use crate::notify::models::{MailchimpProblem, MemberRequest};
use anyhow::{Context, Result};
use base64::prelude::*;
use reqwest::blocking::Client;

pub struct MailchimpClient {
    client: Client,
    base_url: String, // https://{dc}.api.mailchimp.com/3.0
    list_id: String,
    api_key: String,
}

impl MailchimpClient {
    /// `server_prefix` may be empty; the data center is then taken from the
    /// key's `-us21` style suffix.
    pub fn new(api_key: &str, server_prefix: &str, list_id: &str) -> Self {
        let dc = if server_prefix.is_empty() {
            api_key.rsplit_once('-').map_or("us1", |(_, dc)| dc)
        } else {
            server_prefix
        };
        Self {
            client: Client::new(),
            base_url: format!("https://{}.api.mailchimp.com/3.0", dc),
            list_id: list_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> String {
        let val = format!("anystring:{}", self.api_key);
        format!("Basic {}", BASE64_STANDARD.encode(val))
    }
}

impl MailingList for MailchimpClient {
    fn add_member(&self, email: &str) -> Result<()> {
        let url = format!("{}/lists/{}/members", self.base_url, self.list_id);

        let body = MemberRequest {
            email_address: email,
            status: "subscribed",
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .context("Failed to send request to Mailchimp")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let problem = response.json::<MailchimpProblem>().unwrap_or_default();
        if problem.title == "Member Exists" {
            return Err(NotifyError::AlreadySubscribed.into());
        }

        Err(NotifyError::Provider {
            status: status.as_u16(),
            detail: format!("{} {}", problem.title, problem.detail)
                .trim()
                .to_string(),
        }
        .into())
    }
}
