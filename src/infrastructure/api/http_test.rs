use std::io::Write;

use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use tempfile::NamedTempFile;
use test_utils::dashboard_fixture;
use test_utils::upcoming_posts_fixture;

use super::HttpApi;
use crate::domain::models::Api;
use crate::domain::models::ApiError;
use crate::domain::models::GenerateContentRequest;
use crate::domain::models::PublishRequest;
use crate::domain::models::ScheduleRequest;
use crate::domain::models::SourceType;
use crate::domain::models::Tone;
use crate::domain::models::UploadRequest;

#[tokio::test]
async fn it_generates_content() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate-content")
        .match_body(Matcher::Json(json!({
            "source_type": "bullets",
            "source_data": "- shipped v1\n- hired two engineers",
            "tone": "inspirational",
        })))
        .with_status(200)
        .with_body(r#"{"content": "What a quarter!"}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .generate_content(GenerateContentRequest {
            source_type: SourceType::Bullets,
            source_data: "- shipped v1\n- hired two engineers".to_string(),
            tone: Tone::Inspirational,
        })
        .await?;

    assert_eq!(res.content, "What a quarter!");
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_generate_content_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate-content")
        .with_status(500)
        .with_body(r#"{"detail": "boom"}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .generate_content(GenerateContentRequest {
            source_type: SourceType::Text,
            source_data: "Hello".to_string(),
            tone: Tone::Professional,
        })
        .await;

    match res {
        Err(ApiError::Status { context, status }) => {
            assert_eq!(context, "Failed to generate content");
            assert_eq!(status, 500);
        }
        other => panic!("unexpected result: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn it_uploads_files_as_multipart() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"Quarterly report body")?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename=""#.to_string()),
            Matcher::Regex("Quarterly report body".to_string()),
            Matcher::Regex(r#"name="tone""#.to_string()),
            Matcher::Regex("storytelling".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"content": "From the report"}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .upload(UploadRequest {
            path: file.path().to_path_buf(),
            tone: Tone::Storytelling,
        })
        .await?;

    assert_eq!(res.content, "From the report");
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_upload_missing_files() {
    let api = HttpApi::with_url("http://127.0.0.1:1".to_string());
    let res = api
        .upload(UploadRequest {
            path: "/definitely/not/here.pdf".into(),
            tone: Tone::Professional,
        })
        .await;

    assert!(matches!(res, Err(ApiError::File { .. })));
}

#[tokio::test]
async fn it_publishes_content() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/publish")
        .match_body(Matcher::Json(json!({
            "content": "Hello LinkedIn",
            "access_token": "token",
            "refresh_token": null,
            "token_expires_at": null,
        })))
        .with_status(200)
        .with_body(r#"{"status": "success", "post_id": "urn:li:share:7"}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .publish(PublishRequest {
            content: "Hello LinkedIn".to_string(),
            access_token: "token".to_string(),
            refresh_token: None,
            token_expires_at: None,
        })
        .await?;

    assert_eq!(res.post_id, Some("urn:li:share:7".to_string()));
    assert!(!res.token_refreshed);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_publish() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/publish")
        .with_status(401)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .publish(PublishRequest {
            content: "Hello".to_string(),
            access_token: "expired".to_string(),
            refresh_token: None,
            token_expires_at: None,
        })
        .await;

    assert_eq!(
        res.map_err(|e| return e.to_string()),
        Err("Failed to publish content".to_string())
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn it_schedules_posts_with_the_raw_time() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/schedule")
        .match_body(Matcher::Json(json!({
            "content": "Launch day",
            "scheduled_time": "2024-03-01T09:00",
            "linkedin_account": "42",
        })))
        .with_status(200)
        .with_body(r#"{"status": "success", "message": "Post scheduled successfully"}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .schedule(ScheduleRequest {
            content: "Launch day".to_string(),
            scheduled_time: "2024-03-01T09:00".to_string(),
            linkedin_account: "42".to_string(),
        })
        .await?;

    assert_eq!(res.message, Some("Post scheduled successfully".to_string()));
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_publishes_when_the_reply_has_unexpected_fields() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/publish")
        .with_status(200)
        .with_body(r#"{"status":"success","post_id":12345,"token_refreshed":null}"#)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api
        .publish(PublishRequest {
            content: "Hello".to_string(),
            access_token: "token".to_string(),
            refresh_token: None,
            token_expires_at: None,
        })
        .await?;

    assert_eq!(res.post_id, Some("12345".to_string()));
    assert!(!res.token_refreshed);
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_schedules_on_any_successful_reply() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let structured = server
        .mock("POST", "/api/schedule")
        .with_status(200)
        .with_body(r#"{"post_id":7,"scheduled_time":null,"message":{"text":"ok"}}"#)
        .expect(1)
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let req = ScheduleRequest {
        content: "Launch day".to_string(),
        scheduled_time: "2024-03-01T09:00".to_string(),
        linkedin_account: "42".to_string(),
    };

    let res = api.schedule(req.clone()).await?;
    assert_eq!(res.message, None);
    assert_eq!(res.scheduled_time, None);
    structured.assert_async().await;
    structured.remove_async().await;

    let empty = server
        .mock("POST", "/api/schedule")
        .with_status(201)
        .with_body("Created")
        .create_async()
        .await;

    assert!(api.schedule(req).await.is_ok());
    empty.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_lists_upcoming_posts() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/upcoming-posts")
        .with_status(200)
        .with_body(upcoming_posts_fixture())
        .create_async()
        .await;

    let api = HttpApi::with_url(format!("{}/", server.url()));
    let res = api.upcoming_posts().await?;

    assert_eq!(res.posts.len(), 2);
    assert_eq!(res.posts[0].scheduled_time, "2024-03-01T09:00:00");
    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_unreadable_upcoming_posts() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/upcoming-posts")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api.upcoming_posts().await;

    assert!(matches!(res, Err(ApiError::Decode { .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fetches_the_dashboard() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/dashboard")
        .with_status(200)
        .with_body(dashboard_fixture())
        .create_async()
        .await;

    let api = HttpApi::with_url(server.url());
    let res = api.dashboard().await?;

    assert_eq!(res["total_posts"], 42);
    mock.assert_async().await;
    return Ok(());
}
