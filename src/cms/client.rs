use crate::cms::ContentStore;
use crate::cms::models::{MutationRequest, MutationResponse, QueryResponse, VideoDocument};
use crate::error::ApiError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

const VIDEO_PROJECTION: &str = "{_id, _type, title, youtubeUrl, videoId, duration}";

pub struct SanityClient {
    client: Client,
    base_url: String, // https://{project}.api.sanity.io
    dataset: String,
    api_version: String,
    token: String,
    video_types: Vec<String>,
}

impl SanityClient {
    pub fn new(project_id: &str, dataset: &str, api_version: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("https://{}.api.sanity.io", project_id),
            dataset: dataset.to_string(),
            api_version: api_version.to_string(),
            token: token.to_string(),
            video_types: vec!["video".to_string()],
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_video_types(mut self, types: &[String]) -> Self {
        self.video_types = types.to_vec();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            self.base_url, self.api_version, action, self.dataset
        )
    }

    /// Run a GROQ query. `params` become `$name` query parameters, JSON-encoded.
    pub fn query<T: DeserializeOwned>(&self, groq: &str, params: &[(&str, Value)]) -> Result<T> {
        let mut pairs = vec![("query".to_string(), groq.to_string())];
        for (name, value) in params {
            pairs.push((format!("${}", name), value.to_string()));
        }

        let response = self
            .client
            .get(self.endpoint("query"))
            .bearer_auth(&self.token)
            .query(&pairs)
            .send()
            .context("Failed to send GROQ query to Sanity")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ApiError {
                service: "Sanity query",
                status,
                body,
            }
            .into());
        }

        let envelope = response
            .json::<QueryResponse<T>>()
            .context("Failed to parse Sanity query response")?;

        if let Some(ms) = envelope.ms {
            tracing::debug!("GROQ query took {}ms", ms);
        }

        Ok(envelope.result)
    }

    pub fn mutate(&self, request: &MutationRequest) -> Result<MutationResponse> {
        let response = self
            .client
            .post(self.endpoint("mutate"))
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .context("Failed to send mutation to Sanity")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(ApiError {
                service: "Sanity mutate",
                status,
                body,
            }
            .into());
        }

        response
            .json::<MutationResponse>()
            .context("Failed to parse Sanity mutation response")
    }
}

impl ContentStore for SanityClient {
    fn query_videos(&self) -> Result<Vec<VideoDocument>> {
        let groq = format!(
            "*[_type in $types && (defined(youtubeUrl) || defined(videoId))] | order(_id) {}",
            VIDEO_PROJECTION
        );
        self.query(&groq, &[("types", serde_json::json!(self.video_types))])
    }

    fn patch_duration(&self, document_id: &str, duration: &str) -> Result<()> {
        let request = MutationRequest::set_field(document_id, "duration", Value::from(duration));
        let response = self.mutate(&request)?;
        tracing::debug!(
            "Patched {} in transaction {}",
            document_id,
            response.transaction_id
        );
        Ok(())
    }
}
