use troupe_content::youtube::VideoMetadataSource;
use troupe_content::youtube::client::YouTubeClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_duration_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "contentDetails"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .and(query_param("key", "yt-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "youtube#videoListResponse",
            "items": [{
                "id": "dQw4w9WgXcQ",
                "contentDetails": { "duration": "PT12M36S" }
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let duration = tokio::task::spawn_blocking(move || {
        let client = YouTubeClient::new("yt-test-key").with_base_url(&uri);
        client.fetch_duration("dQw4w9WgXcQ")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(duration.as_deref(), Some("PT12M36S"));
}

#[tokio::test]
async fn test_fetch_duration_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "youtube#videoListResponse",
            "items": []
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let duration = tokio::task::spawn_blocking(move || {
        YouTubeClient::new("yt-test-key")
            .with_base_url(&uri)
            .fetch_duration("xxxxxxxxxxx")
    })
    .await
    .unwrap()
    .unwrap();

    assert!(duration.is_none());
}

#[tokio::test]
async fn test_fetch_duration_quota_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&mock_server)
        .await;

    let uri = mock_server.uri();
    let result = tokio::task::spawn_blocking(move || {
        YouTubeClient::new("yt-test-key")
            .with_base_url(&uri)
            .fetch_duration("dQw4w9WgXcQ")
    })
    .await
    .unwrap();

    let err = result.unwrap_err().to_string();
    assert!(err.contains("403"), "unexpected error: {}", err);
    assert!(err.contains("quotaExceeded"), "unexpected error: {}", err);
}
