use serde::Deserialize;

/// `GET /videos?part=contentDetails` response
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601, e.g. "PT12M36S"
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_video_list() {
        let json = json!({
            "kind": "youtube#videoListResponse",
            "items": [{
                "kind": "youtube#video",
                "id": "dQw4w9WgXcQ",
                "contentDetails": { "duration": "PT3M33S", "definition": "hd" }
            }]
        });

        let resp: VideoListResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].content_details.duration, "PT3M33S");
    }

    #[test]
    fn test_deserialize_missing_items() {
        let resp: VideoListResponse =
            serde_json::from_value(json!({ "kind": "youtube#videoListResponse" })).unwrap();
        assert!(resp.items.is_empty());
    }
}
