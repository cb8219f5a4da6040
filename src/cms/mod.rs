//! Content store: the hosted Sanity dataset holding video documents.

pub mod client;
pub mod models;

use crate::cms::models::VideoDocument;
use anyhow::Result;

pub trait ContentStore {
    /// All documents that carry a video and a `duration` field.
    fn query_videos(&self) -> Result<Vec<VideoDocument>>;

    /// Set the document's `duration` field to `duration`.
    fn patch_duration(&self, document_id: &str, duration: &str) -> Result<()>;
}
