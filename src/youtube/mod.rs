//! Video-metadata source: YouTube Data API lookups.

pub mod client;
pub mod models;

use anyhow::Result;
use url::Url;

/// Anything that can resolve a video id to its ISO-8601 duration.
pub trait VideoMetadataSource {
    /// `Ok(None)` means the video does not exist (or is private).
    fn fetch_duration(&self, video_id: &str) -> Result<Option<String>>;
}

const ID_LEN: usize = 11;

fn is_video_id(s: &str) -> bool {
    s.len() == ID_LEN
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Pull the video id out of whatever editors pasted into the CMS.
///
/// Accepts a bare id, `watch?v=`, `youtu.be/`, `/embed/`, `/shorts/`,
/// `/live/` and `/v/` links, with or without a scheme.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if is_video_id(input) {
        return Some(input.to_string());
    }

    let url = if input.contains("://") {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("https://{}", input)).ok()?
    };

    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" | "youtube-nocookie.com" => {
            match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned()),
                "embed" | "shorts" | "live" | "v" => segments.next().map(str::to_string),
                _ => None,
            }
        }
        _ => None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}
