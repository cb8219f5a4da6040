//! Form forwarders: newsletter signup (Mailchimp) and contact mail (Resend).
//!
//! Handlers validate, forward once, and turn every outcome into a response
//! the site can show. Provider failures are logged and reported with a
//! generic message.

pub mod mailchimp;
pub mod models;
pub mod resend;

use crate::error::NotifyError;
use crate::notify::models::{ContactRequest, ContactResponse, SubscribeRequest, SubscribeResponse};
use anyhow::Result;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

pub trait MailingList {
    fn add_member(&self, email: &str) -> Result<()>;
}

pub trait Mailer {
    /// Returns the provider's message id.
    fn send(&self, message: &ContactMessage) -> Result<String>;
}

/// A validated contact form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn subject(&self) -> String {
        format!("New contact form submission from {}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\n{}",
            self.name, self.email, self.message
        )
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

fn validate_email(email: &str) -> Result<&str, NotifyError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(NotifyError::MissingEmail);
    }
    if !is_valid_email(email) {
        return Err(NotifyError::InvalidEmail);
    }
    Ok(email)
}

/// Message to show for a failed forward; provider details stay in the log.
fn public_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<NotifyError>() {
        Some(NotifyError::Provider { .. }) | None => GENERIC_FAILURE.to_string(),
        Some(known) => known.to_string(),
    }
}

pub fn subscribe(list: &dyn MailingList, request: &SubscribeRequest) -> SubscribeResponse {
    let email = match validate_email(&request.email) {
        Ok(email) => email,
        Err(e) => {
            return SubscribeResponse {
                success: false,
                message: None,
                error: Some(e.to_string()),
            };
        }
    };

    match list.add_member(email) {
        Ok(()) => {
            tracing::info!("Subscribed {}", email);
            SubscribeResponse {
                success: true,
                message: Some("Successfully subscribed!".to_string()),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Subscribe failed for {}: {:#}", email, e);
            SubscribeResponse {
                success: false,
                message: None,
                error: Some(public_error(&e)),
            }
        }
    }
}

fn validate_contact(request: &ContactRequest) -> Result<ContactMessage, NotifyError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(NotifyError::MissingField("name"));
    }
    let message = request.message.trim();
    if message.is_empty() {
        return Err(NotifyError::MissingField("message"));
    }
    let email = validate_email(&request.email)?;

    Ok(ContactMessage {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

pub fn contact(mailer: &dyn Mailer, request: &ContactRequest) -> ContactResponse {
    let message = match validate_contact(request) {
        Ok(message) => message,
        Err(e) => {
            return ContactResponse {
                success: false,
                error: Some(e.to_string()),
            };
        }
    };

    match mailer.send(&message) {
        Ok(id) => {
            tracing::info!("Contact message from {} sent ({})", message.email, id);
            ContactResponse {
                success: true,
                error: None,
            }
        }
        Err(e) => {
            tracing::error!("Contact send failed: {:#}", e);
            ContactResponse {
                success: false,
                error: Some(public_error(&e)),
            }
        }
    }
}
