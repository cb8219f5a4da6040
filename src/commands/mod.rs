pub mod config;
pub mod duration;
pub mod notify;
pub mod sync;
pub mod video;

use crate::cms::client::SanityClient;
use crate::config::Config;
use crate::notify::mailchimp::MailchimpClient;
use crate::notify::resend::ResendClient;
use crate::youtube::client::YouTubeClient;
use anyhow::Result;

pub fn sanity_client(config: &Config) -> Result<SanityClient> {
    let sanity = &config.sanity;
    if sanity.project_id.is_empty() {
        anyhow::bail!("sanity.project_id not set. Add it to ~/.troupe/config.toml");
    }

    let client = SanityClient::new(
        &sanity.project_id,
        &sanity.dataset,
        &sanity.api_version,
        &config.sanity_token()?,
    )
    .with_video_types(&sanity.video_types);

    Ok(match &sanity.api_url {
        Some(url) => client.with_base_url(url),
        None => client,
    })
}

pub fn youtube_client(config: &Config) -> Result<YouTubeClient> {
    let client = YouTubeClient::new(&config.youtube_api_key()?);
    Ok(match &config.youtube.api_url {
        Some(url) => client.with_base_url(url),
        None => client,
    })
}

pub fn mailchimp_client(config: &Config) -> Result<MailchimpClient> {
    let mc = &config.mailchimp;
    if mc.list_id.is_empty() {
        anyhow::bail!("mailchimp.list_id not set");
    }
    let client = MailchimpClient::new(&config.mailchimp_api_key()?, &mc.server_prefix, &mc.list_id);
    Ok(match &mc.api_url {
        Some(url) => client.with_base_url(url),
        None => client,
    })
}

pub fn resend_client(config: &Config) -> Result<ResendClient> {
    let resend = &config.resend;
    if resend.from.is_empty() || resend.to.is_empty() {
        anyhow::bail!("resend.from and resend.to must both be set");
    }
    let client = ResendClient::new(&config.resend_api_key()?, &resend.from, &resend.to);
    Ok(match &resend.api_url {
        Some(url) => client.with_base_url(url),
        None => client,
    })
}
