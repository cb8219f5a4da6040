use crate::OutputFormat;
use crate::config::Config;
use crate::notify::models::{ContactRequest, SubscribeRequest};
use anyhow::Result;
use serde::Serialize;

fn finish<T: Serialize>(
    response: &T,
    success: bool,
    text: &str,
    error: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Text if success => println!("✓ {}", text),
        OutputFormat::Text => {}
    }
    if !success {
        anyhow::bail!("{}", error.unwrap_or("Request failed"));
    }
    Ok(())
}

/// Add an address to the newsletter list
pub fn subscribe(config: &Config, email: &str, output: OutputFormat) -> Result<()> {
    let client = super::mailchimp_client(config)?;
    let response = crate::notify::subscribe(
        &client,
        &SubscribeRequest {
            email: email.to_string(),
        },
    );
    finish(
        &response,
        response.success,
        response.message.as_deref().unwrap_or("Subscribed"),
        response.error.as_deref(),
        output,
    )
}

/// Forward a contact form message to the company inbox
pub fn contact(
    config: &Config,
    name: &str,
    email: &str,
    message: &str,
    output: OutputFormat,
) -> Result<()> {
    let client = super::resend_client(config)?;
    let response = crate::notify::contact(
        &client,
        &ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        },
    );
    finish(
        &response,
        response.success,
        "Message sent",
        response.error.as_deref(),
        output,
    )
}
