use anyhow::Result;
use test_utils::upcoming_posts_fixture;

use super::ApiError;
use super::GenerateContentRequest;
use super::PublishResponse;
use super::ScheduleResponse;
use super::UpcomingPostsResponse;
use crate::domain::models::SourceType;
use crate::domain::models::Tone;

#[test]
fn it_renders_status_errors_as_the_short_message() {
    let err = ApiError::Status {
        context: "Failed to publish content",
        status: 500,
    };
    assert_eq!(err.to_string(), "Failed to publish content");
}

#[test]
fn it_renders_missing_credentials() {
    let err = ApiError::MissingCredentials("acme".to_string());
    assert_eq!(
        err.to_string(),
        "No credentials configured for LinkedIn account acme"
    );
}

#[test]
fn it_serializes_generate_requests() -> Result<()> {
    let req = GenerateContentRequest {
        source_type: SourceType::Text,
        source_data: "Rust is fun".to_string(),
        tone: Tone::Humorous,
    };

    insta::assert_snapshot!(serde_json::to_string(&req)?, @r###"{"source_type":"text","source_data":"Rust is fun","tone":"humorous"}"###);

    return Ok(());
}

#[test]
fn it_accepts_minimal_publish_responses() -> Result<()> {
    let res = PublishResponse::from_value(&serde_json::from_str(r#"{"status": "success"}"#)?);
    assert_eq!(res, PublishResponse::default());

    let res = PublishResponse::from_value(&serde_json::from_str(
        r#"{"post_id": "urn:li:share:1", "access_token": "new", "token_refreshed": true}"#,
    )?);
    assert_eq!(res.post_id, Some("urn:li:share:1".to_string()));
    assert_eq!(res.access_token, Some("new".to_string()));
    assert!(res.token_refreshed);

    return Ok(());
}

#[test]
fn it_reads_publish_responses_with_unexpected_types() -> Result<()> {
    let res = PublishResponse::from_value(&serde_json::from_str(
        r#"{"status": "success", "post_id": 12345, "token_refreshed": null, "access_token": {"value": "x"}}"#,
    )?);
    assert_eq!(res.post_id, Some("12345".to_string()));
    assert_eq!(res.access_token, None);
    assert!(!res.token_refreshed);

    let res = PublishResponse::from_value(&serde_json::Value::Null);
    assert_eq!(res, PublishResponse::default());

    return Ok(());
}

#[test]
fn it_reads_schedule_responses_with_unexpected_types() -> Result<()> {
    let res = ScheduleResponse::from_value(&serde_json::from_str(
        r#"{"post_id": 7, "scheduled_time": null, "message": {"text": "ok"}}"#,
    )?);
    assert_eq!(res, ScheduleResponse::default());

    return Ok(());
}

#[test]
fn it_parses_upcoming_posts() -> Result<()> {
    let res: UpcomingPostsResponse = serde_json::from_str(upcoming_posts_fixture())?;
    assert_eq!(res.posts.len(), 2);
    assert_eq!(res.posts[1].content, "We're hiring!");

    let empty: UpcomingPostsResponse = serde_json::from_str("{}")?;
    assert!(empty.posts.is_empty());

    return Ok(());
}
