use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use test_utils::dashboard_fixture;

use super::ActionsService;
use crate::domain::models::Account;
use crate::domain::models::AccountCredentials;
use crate::domain::models::AccountDirectory;
use crate::domain::models::Action;
use crate::domain::models::Api;
use crate::domain::models::ApiError;
use crate::domain::models::ButtonState;
use crate::domain::models::Clipboard;
use crate::domain::models::Completion;
use crate::domain::models::Control;
use crate::domain::models::Event;
use crate::domain::models::GenerateContentRequest;
use crate::domain::models::GenerateContentResponse;
use crate::domain::models::GenerateJob;
use crate::domain::models::PublishJob;
use crate::domain::models::PublishRequest;
use crate::domain::models::PublishResponse;
use crate::domain::models::ScheduleJob;
use crate::domain::models::ScheduleOrigin;
use crate::domain::models::ScheduleRequest;
use crate::domain::models::ScheduleResponse;
use crate::domain::models::SourceType;
use crate::domain::models::Tone;
use crate::domain::models::UiUpdate;
use crate::domain::models::UpcomingPost;
use crate::domain::models::UpcomingPostsResponse;
use crate::domain::models::UploadRequest;
use crate::domain::services::UiState;
use crate::infrastructure::api::HttpApi;

#[derive(Default)]
struct Calls {
    generated: Vec<GenerateContentRequest>,
    uploaded: Vec<UploadRequest>,
    published: Vec<PublishRequest>,
    scheduled: Vec<ScheduleRequest>,
    upcoming: usize,
}

#[derive(Default)]
struct FakeApi {
    calls: Arc<Mutex<Calls>>,
    publish_response: PublishResponse,
    fail_schedule: bool,
}

#[async_trait]
impl Api for FakeApi {
    #[allow(clippy::implicit_return)]
    async fn generate_content(
        &self,
        req: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiError> {
        let content = format!("Generated from {}", req.source_data);
        self.calls.lock().unwrap().generated.push(req);
        return Ok(GenerateContentResponse { content });
    }

    #[allow(clippy::implicit_return)]
    async fn upload(&self, req: UploadRequest) -> Result<GenerateContentResponse, ApiError> {
        self.calls.lock().unwrap().uploaded.push(req);
        return Ok(GenerateContentResponse {
            content: "Generated from file".to_string(),
        });
    }

    #[allow(clippy::implicit_return)]
    async fn publish(&self, req: PublishRequest) -> Result<PublishResponse, ApiError> {
        self.calls.lock().unwrap().published.push(req);
        return Ok(self.publish_response.clone());
    }

    #[allow(clippy::implicit_return)]
    async fn schedule(&self, req: ScheduleRequest) -> Result<ScheduleResponse, ApiError> {
        self.calls.lock().unwrap().scheduled.push(req);
        if self.fail_schedule {
            return Err(ApiError::Status {
                context: "Failed to schedule post",
                status: 400,
            });
        }
        return Ok(ScheduleResponse::default());
    }

    #[allow(clippy::implicit_return)]
    async fn upcoming_posts(&self) -> Result<UpcomingPostsResponse, ApiError> {
        self.calls.lock().unwrap().upcoming += 1;
        return Ok(UpcomingPostsResponse {
            posts: vec![UpcomingPost {
                scheduled_time: "2024-03-01T09:00:00".to_string(),
                content: "Launch".to_string(),
            }],
        });
    }

    #[allow(clippy::implicit_return)]
    async fn dashboard(&self) -> Result<serde_json::Value, ApiError> {
        return Ok(serde_json::from_str(dashboard_fixture()).unwrap());
    }
}

#[derive(Default)]
struct FakeClipboard {
    texts: Arc<Mutex<Vec<String>>>,
    broken: bool,
}

#[async_trait]
impl Clipboard for FakeClipboard {
    #[allow(clippy::implicit_return)]
    async fn set_text(&self, text: String) -> Result<()> {
        if self.broken {
            bail!("no display");
        }
        self.texts.lock().unwrap().push(text);
        return Ok(());
    }
}

#[derive(Default)]
struct FakeAccounts {
    credentials: Arc<Mutex<Vec<(String, AccountCredentials)>>>,
}

impl FakeAccounts {
    fn with_account(id: &str, access_token: &str) -> FakeAccounts {
        let accounts = FakeAccounts::default();
        accounts.credentials.lock().unwrap().push((
            id.to_string(),
            AccountCredentials {
                access_token: access_token.to_string(),
                refresh_token: Some("refresh".to_string()),
                token_expires_at: None,
            },
        ));
        return accounts;
    }
}

impl AccountDirectory for FakeAccounts {
    fn list(&self) -> Vec<Account> {
        return self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .map(|(id, _)| {
                return Account {
                    id: id.to_string(),
                    name: id.to_string(),
                };
            })
            .collect();
    }

    fn credentials(&self, account_id: &str) -> Option<AccountCredentials> {
        return self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|(id, _)| return id == account_id)
            .map(|(_, creds)| return creds.clone());
    }

    fn update_credentials(&self, account_id: &str, credentials: AccountCredentials) {
        let mut all = self.credentials.lock().unwrap();
        all.retain(|(id, _)| return id != account_id);
        all.push((account_id.to_string(), credentials));
    }
}

fn service(api: FakeApi, accounts: FakeAccounts, clipboard: FakeClipboard) -> ActionsService {
    return ActionsService::new(Box::new(api), Box::new(accounts), Box::new(clipboard));
}

fn schedule_job(origin: ScheduleOrigin, refresh_upcoming: bool) -> ScheduleJob {
    return ScheduleJob {
        origin,
        request: ScheduleRequest {
            content: "Launch".to_string(),
            scheduled_time: "2024-03-01T09:00".to_string(),
            linkedin_account: "1".to_string(),
        },
        refresh_upcoming,
    };
}

fn collect_updates(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Event>) -> Vec<UiUpdate> {
    let mut updates = vec![];
    while let Ok(event) = rx.try_recv() {
        if let Event::Updates(batch) = event {
            updates.extend(batch);
        }
    }
    return updates;
}

#[tokio::test]
async fn it_generates_from_text_without_uploading() {
    let api = FakeApi::default();
    let calls = Arc::clone(&api.calls);
    let service = service(api, FakeAccounts::default(), FakeClipboard::default());

    let res = service
        .run(Action::Generate(GenerateJob::Content(GenerateContentRequest {
            source_type: SourceType::Text,
            source_data: "Rust is fun".to_string(),
            tone: Tone::Professional,
        })))
        .await;

    match res {
        Completion::Generated(Ok(content)) => assert_eq!(content, "Generated from Rust is fun"),
        other => panic!("unexpected completion: {other:?}"),
    }

    let calls = calls.lock().unwrap();
    assert_eq!(calls.generated.len(), 1);
    assert_eq!(calls.generated[0].source_data, "Rust is fun");
    assert!(calls.uploaded.is_empty());
}

#[tokio::test]
async fn it_uploads_files() {
    let api = FakeApi::default();
    let calls = Arc::clone(&api.calls);
    let service = service(api, FakeAccounts::default(), FakeClipboard::default());

    let res = service
        .run(Action::Generate(GenerateJob::Upload(UploadRequest {
            path: "/tmp/report.pdf".into(),
            tone: Tone::Humorous,
        })))
        .await;

    assert!(matches!(res, Completion::Generated(Ok(_))));
    let calls = calls.lock().unwrap();
    assert_eq!(calls.uploaded.len(), 1);
    assert!(calls.generated.is_empty());
}

#[tokio::test]
async fn it_copies_to_the_clipboard() {
    let clipboard = FakeClipboard::default();
    let texts = Arc::clone(&clipboard.texts);
    let service = service(FakeApi::default(), FakeAccounts::default(), clipboard);

    let res = service.run(Action::Copy("Hello".to_string())).await;

    assert!(matches!(res, Completion::Copied(Ok(()))));
    assert_eq!(*texts.lock().unwrap(), vec!["Hello".to_string()]);
}

#[tokio::test]
async fn it_reports_clipboard_failures() {
    let clipboard = FakeClipboard {
        broken: true,
        ..FakeClipboard::default()
    };
    let service = service(FakeApi::default(), FakeAccounts::default(), clipboard);

    let res = service.run(Action::Copy("Hello".to_string())).await;
    assert!(matches!(res, Completion::Copied(Err(_))));
}

#[tokio::test]
async fn it_publishes_with_account_credentials() {
    let api = FakeApi::default();
    let calls = Arc::clone(&api.calls);
    let service = service(
        api,
        FakeAccounts::with_account("1", "token"),
        FakeClipboard::default(),
    );

    let res = service
        .run(Action::Publish(PublishJob {
            content: "Hello".to_string(),
            account_id: "1".to_string(),
        }))
        .await;

    assert!(matches!(res, Completion::Published(Ok(_))));
    let calls = calls.lock().unwrap();
    assert_eq!(
        calls.published,
        vec![PublishRequest {
            content: "Hello".to_string(),
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_expires_at: None,
        }]
    );
}

#[tokio::test]
async fn it_refuses_to_publish_without_credentials() {
    let api = FakeApi::default();
    let calls = Arc::clone(&api.calls);
    let service = service(api, FakeAccounts::default(), FakeClipboard::default());

    let res = service
        .run(Action::Publish(PublishJob {
            content: "Hello".to_string(),
            account_id: "9".to_string(),
        }))
        .await;

    assert!(matches!(
        res,
        Completion::Published(Err(ApiError::MissingCredentials(_)))
    ));
    assert!(calls.lock().unwrap().published.is_empty());
}

#[tokio::test]
async fn it_stores_refreshed_tokens() {
    let api = FakeApi {
        publish_response: PublishResponse {
            post_id: Some("urn:li:share:1".to_string()),
            access_token: Some("fresh".to_string()),
            refresh_token: None,
            token_expires_at: Some("2025-06-01T00:00:00".to_string()),
            token_refreshed: true,
        },
        ..FakeApi::default()
    };
    let accounts = FakeAccounts::with_account("1", "stale");
    let stored = Arc::clone(&accounts.credentials);
    let service = service(api, accounts, FakeClipboard::default());

    service
        .run(Action::Publish(PublishJob {
            content: "Hello".to_string(),
            account_id: "1".to_string(),
        }))
        .await;

    let stored = stored.lock().unwrap();
    assert_eq!(
        stored[0].1,
        AccountCredentials {
            access_token: "fresh".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_expires_at: Some("2025-06-01T00:00:00".to_string()),
        }
    );
}

#[tokio::test]
async fn it_refreshes_upcoming_posts_after_scheduling() -> Result<()> {
    let api = FakeApi::default();
    let calls = Arc::clone(&api.calls);
    let service = service(api, FakeAccounts::default(), FakeClipboard::default());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    service
        .dispatch(
            Action::Schedule(schedule_job(ScheduleOrigin::Page, true)),
            &tx,
        )
        .await?;

    let updates = collect_updates(&mut rx);
    assert!(updates.contains(&UiUpdate::Alert("Post scheduled successfully!".to_string())));
    assert!(updates
        .iter()
        .any(|e| return matches!(e, UiUpdate::ShowUpcoming(posts) if posts.len() == 1)));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.scheduled.len(), 1);
    assert_eq!(calls.upcoming, 1);
    return Ok(());
}

#[tokio::test]
async fn it_skips_the_refresh_when_scheduling_fails() -> Result<()> {
    let api = FakeApi {
        fail_schedule: true,
        ..FakeApi::default()
    };
    let calls = Arc::clone(&api.calls);
    let service = service(api, FakeAccounts::default(), FakeClipboard::default());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    service
        .dispatch(
            Action::Schedule(schedule_job(ScheduleOrigin::Modal, true)),
            &tx,
        )
        .await?;

    let updates = collect_updates(&mut rx);
    assert_eq!(
        updates,
        vec![
            UiUpdate::Alert("Error scheduling post: Failed to schedule post".to_string()),
            UiUpdate::SetButton(Control::ConfirmSchedule, ButtonState::idle("Schedule")),
        ]
    );
    assert_eq!(calls.lock().unwrap().upcoming, 0);
    return Ok(());
}

#[tokio::test]
async fn it_summarizes_the_dashboard() {
    let service = service(
        FakeApi::default(),
        FakeAccounts::default(),
        FakeClipboard::default(),
    );

    match service.run(Action::FetchDashboard).await {
        Completion::Dashboard(Ok(summary)) => {
            assert!(summary
                .stats
                .contains(&("total posts".to_string(), "42".to_string())));
        }
        other => panic!("unexpected completion: {other:?}"),
    }
}

#[tokio::test]
async fn it_restores_publish_after_server_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/publish")
        .with_status(500)
        .create_async()
        .await;

    let service = ActionsService::new(
        Box::new(HttpApi::with_url(server.url())),
        Box::new(FakeAccounts::with_account("1", "token")),
        Box::<FakeClipboard>::default(),
    );
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    let mut state = UiState::new(Tone::default(), vec![]);
    state.apply(UiUpdate::SetButton(
        Control::ConfirmPublish,
        ButtonState::busy("Publishing..."),
    ));

    service
        .dispatch(
            Action::Publish(PublishJob {
                content: "Hello".to_string(),
                account_id: "1".to_string(),
            }),
            &tx,
        )
        .await?;
    state.apply_all(collect_updates(&mut rx));

    assert_eq!(
        state.alert(),
        Some(&"Error publishing content: Failed to publish content".to_string())
    );
    assert_eq!(
        state.button(Control::ConfirmPublish),
        ButtonState::idle("Publish")
    );
    mock.assert_async().await;
    return Ok(());
}
