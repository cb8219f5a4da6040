use crate::youtube::extract_video_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GROQ query envelope: `{ "ms": 12, "query": "...", "result": ... }`
#[derive(Debug, Deserialize)]
pub struct QueryResponse<T> {
    pub result: T,
    pub ms: Option<u64>,
}

/// Projection of a video-bearing document.
///
/// `duration` is kept as raw JSON because legacy documents hold strings,
/// numbers, and in a few cases objects. Go through [`decode_duration`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VideoDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "youtubeUrl", default)]
    pub youtube_url: Option<String>,
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub duration: Value,
}

impl VideoDocument {
    /// YouTube id from `videoId`, falling back to `youtubeUrl`.
    pub fn youtube_id(&self) -> Option<String> {
        self.video_id
            .as_deref()
            .and_then(extract_video_id)
            .or_else(|| self.youtube_url.as_deref().and_then(extract_video_id))
    }

    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Map a stored `duration` to a string ready for parsing.
///
/// Strings are trimmed (empty and `"null"` become `None`), numbers become
/// their decimal text, and object or array values are dropped with a
/// warning.
pub fn decode_duration(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty() && s != "null").then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) | Value::Array(_) | Value::Bool(_) => {
            tracing::warn!("Malformed duration value {}; treating as missing", value);
            None
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MutationRequest {
    pub mutations: Vec<Mutation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    Patch(Patch),
}

#[derive(Debug, Serialize)]
pub struct Patch {
    pub id: String,
    pub set: serde_json::Map<String, Value>,
}

impl MutationRequest {
    pub fn set_field(id: &str, field: &str, value: Value) -> Self {
        let mut set = serde_json::Map::new();
        set.insert(field.to_string(), value);
        Self {
            mutations: vec![Mutation::Patch(Patch {
                id: id.to_string(),
                set,
            })],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

#[derive(Debug, Deserialize)]
pub struct MutationResult {
    pub id: String,
    pub operation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_duration_shapes() {
        assert_eq!(decode_duration(&json!(" 3:45 ")), Some("3:45".to_string()));
        assert_eq!(decode_duration(&json!(3.75)), Some("3.75".to_string()));
        assert_eq!(decode_duration(&json!(4)), Some("4".to_string()));
        assert_eq!(decode_duration(&json!("")), None);
        assert_eq!(decode_duration(&json!("null")), None);
        assert_eq!(decode_duration(&Value::Null), None);
    }

    #[test]
    fn test_decode_duration_legacy_object() {
        assert_eq!(decode_duration(&json!({ "_type": "duration", "value": "3:45" })), None);
        assert_eq!(decode_duration(&json!(["3:45"])), None);
    }

    #[test]
    fn test_deserialize_video_document() {
        let doc: VideoDocument = serde_json::from_value(json!({
            "_id": "video-spring-gala",
            "_type": "video",
            "title": "Spring Gala",
            "youtubeUrl": "https://youtu.be/dQw4w9WgXcQ"
        }))
        .unwrap();

        assert_eq!(doc.id, "video-spring-gala");
        assert_eq!(doc.duration, Value::Null);
        assert_eq!(doc.youtube_id().as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(doc.label(), "Spring Gala");
    }

    #[test]
    fn test_video_id_field_wins_over_url() {
        let doc: VideoDocument = serde_json::from_value(json!({
            "_id": "v1",
            "videoId": "aaaaaaaaaaa",
            "youtubeUrl": "https://youtu.be/bbbbbbbbbbb"
        }))
        .unwrap();
        assert_eq!(doc.youtube_id().as_deref(), Some("aaaaaaaaaaa"));
        assert_eq!(doc.label(), "v1");
    }

    #[test]
    fn test_serialize_patch_mutation() {
        let req = MutationRequest::set_field("v1", "duration", json!("12:36"));
        let json = serde_json::to_value(req).unwrap();
        assert_eq!(
            json,
            json!({ "mutations": [{ "patch": { "id": "v1", "set": { "duration": "12:36" } } }] })
        );
    }
}
