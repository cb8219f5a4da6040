use crate::error::ApiError;
use crate::youtube::VideoMetadataSource;
use crate::youtube::models::VideoListResponse;
use anyhow::{Context, Result};
use reqwest::blocking::Client;

pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn get_video_duration(&self, video_id: &str) -> Result<Option<String>> {
        let url = format!("{}/videos", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .context("Failed to send request to YouTube Data API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ApiError {
                service: "YouTube API",
                status,
                body,
            }
            .into());
        }

        let list = response
            .json::<VideoListResponse>()
            .context("Failed to parse YouTube video list")?;

        Ok(list
            .items
            .into_iter()
            .find(|item| item.id == video_id)
            .map(|item| item.content_details.duration))
    }
}

impl VideoMetadataSource for YouTubeClient {
    fn fetch_duration(&self, video_id: &str) -> Result<Option<String>> {
        self.get_video_duration(video_id)
    }
}
