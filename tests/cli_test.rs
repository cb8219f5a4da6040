use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn troupe(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("troupe").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn write_config(home: &Path, content: &str) {
    let config_dir = home.join(".troupe");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_duration_parse_clock() {
    let home = TempDir::new().unwrap();
    troupe(home.path())
        .args(["duration", "parse", "3:45"])
        .assert()
        .success()
        .stdout("225\n");
}

#[test]
fn test_duration_parse_labeled_minutes() {
    let home = TempDir::new().unwrap();
    troupe(home.path())
        .args(["duration", "parse", "5 minutes"])
        .assert()
        .success()
        .stdout("300\n");
}

#[test]
fn test_duration_format_hours() {
    let home = TempDir::new().unwrap();
    troupe(home.path())
        .args(["duration", "format", "3725"])
        .assert()
        .success()
        .stdout("1:02:05\n");
}

#[test]
fn test_duration_format_negative_clamps() {
    let home = TempDir::new().unwrap();
    troupe(home.path())
        .args(["duration", "format", "-5"])
        .assert()
        .success()
        .stdout("0:00\n");
}

#[test]
fn test_duration_iso_json() {
    let home = TempDir::new().unwrap();
    let output = troupe(home.path())
        .args(["duration", "iso", "PT12M36S", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["seconds"], 756);
    assert_eq!(json["formatted"], "12:36");
}

#[test]
fn test_garbage_duration_warns_in_development() {
    let home = TempDir::new().unwrap();
    troupe(home.path())
        .args(["duration", "parse", "not a duration"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Unrecognized duration format"));
}

#[test]
fn test_garbage_iso_duration_warns_once() {
    let home = TempDir::new().unwrap();
    let assert = troupe(home.path())
        .args(["duration", "iso", "P1DT2H"])
        .assert()
        .success()
        .stdout("0:00\n");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("Unrecognized duration format").count(), 1);
}

#[test]
fn test_garbage_duration_silent_in_production() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "environment = \"production\"\n");

    troupe(home.path())
        .args(["duration", "parse", "not a duration"])
        .assert()
        .success()
        .stdout("0\n")
        .stderr(predicate::str::contains("Unrecognized").not());
}

#[test]
fn test_subscribe_rejects_invalid_email() {
    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        r#"
[mailchimp]
api_key = "KEY-us1"
list_id = "list-1"
api_url = "http://127.0.0.1:9"
"#,
    );

    troupe(home.path())
        .args(["subscribe", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid email"));
}

#[tokio::test]
async fn test_video_duration_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{ "id": "dQw4w9WgXcQ", "contentDetails": { "duration": "PT1H2M3S" } }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    write_config(
        home.path(),
        &format!(
            r#"
[youtube]
api_key = "yt-test-key"
api_url = "{}"
"#,
            mock_server.uri()
        ),
    );

    let mut cmd = troupe(home.path());
    cmd.args(["video", "duration", "https://youtu.be/dQw4w9WgXcQ"]);

    tokio::task::spawn_blocking(move || {
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("dQw4w9WgXcQ 1:02:03 (PT1H2M3S)"));
    })
    .await
    .unwrap();
}
