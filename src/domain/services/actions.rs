#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time;

use super::handlers;
use crate::domain::models::AccountCredentials;
use crate::domain::models::AccountDirectoryBox;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::ClipboardBox;
use crate::domain::models::Completion;
use crate::domain::models::DashboardSummary;
use crate::domain::models::Event;
use crate::domain::models::GenerateJob;
use crate::domain::models::PublishJob;
use crate::domain::models::PublishRequest;
use crate::domain::models::PublishResponse;

/// Runs the side effects requested by the UI: network round trips and
/// clipboard writes. Results go back to the UI as `Event::Updates`.
pub struct ActionsService {
    api: ApiBox,
    accounts: AccountDirectoryBox,
    clipboard: ClipboardBox,
}

impl ActionsService {
    pub fn new(
        api: ApiBox,
        accounts: AccountDirectoryBox,
        clipboard: ClipboardBox,
    ) -> ActionsService {
        return ActionsService {
            api,
            accounts,
            clipboard,
        };
    }

    async fn publish(&self, job: PublishJob) -> Result<PublishResponse, ApiError> {
        let credentials = self
            .accounts
            .credentials(&job.account_id)
            .ok_or_else(|| return ApiError::MissingCredentials(job.account_id.to_string()))?;

        let res = self
            .api
            .publish(PublishRequest {
                content: job.content,
                access_token: credentials.access_token.to_string(),
                refresh_token: credentials.refresh_token.clone(),
                token_expires_at: credentials.token_expires_at.clone(),
            })
            .await?;

        if res.token_refreshed {
            if let Some(access_token) = &res.access_token {
                tracing::info!(account = job.account_id, "LinkedIn token refreshed");
                self.accounts.update_credentials(
                    &job.account_id,
                    AccountCredentials {
                        access_token: access_token.to_string(),
                        refresh_token: res.refresh_token.clone().or(credentials.refresh_token),
                        token_expires_at: res.token_expires_at.clone(),
                    },
                );
            }
        }

        return Ok(res);
    }

    /// Executes a single action and reports how it went. One best-effort
    /// round trip, no retries.
    pub async fn run(&self, action: Action) -> Completion {
        tracing::debug!(action = ?action, "running action");

        match action {
            Action::Generate(GenerateJob::Content(req)) => {
                let res = self.api.generate_content(req).await;
                return Completion::Generated(res.map(|e| return e.content));
            }
            Action::Generate(GenerateJob::Upload(req)) => {
                let res = self.api.upload(req).await;
                return Completion::Generated(res.map(|e| return e.content));
            }
            Action::Copy(text) => {
                return Completion::Copied(self.clipboard.set_text(text).await);
            }
            Action::Publish(job) => {
                return Completion::Published(self.publish(job).await);
            }
            Action::Schedule(job) => {
                let res = self.api.schedule(job.request).await;
                return Completion::Scheduled {
                    origin: job.origin,
                    refresh_upcoming: job.refresh_upcoming,
                    result: res,
                };
            }
            Action::FetchUpcoming => {
                let res = self.api.upcoming_posts().await;
                return Completion::Upcoming(res.map(|e| return e.posts));
            }
            Action::FetchDashboard => {
                let res = self.api.dashboard().await;
                return Completion::Dashboard(
                    res.map(|e| return DashboardSummary::from_value(&e)),
                );
            }
        }
    }

    /// Runs an action plus any follow-up it triggers, sending updates to the
    /// UI as they become available.
    pub async fn dispatch(&self, action: Action, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
        let mut next = Some(action);
        while let Some(action) = next.take() {
            let outcome = handlers::complete(self.run(action).await);
            if !outcome.updates.is_empty() {
                tx.send(Event::Updates(outcome.updates))?;
            }

            for deferred in outcome.deferred {
                let deferred_tx = tx.clone();
                tokio::spawn(async move {
                    time::sleep(deferred.delay).await;
                    let _ = deferred_tx.send(Event::Updates(vec![deferred.update]));
                });
            }

            next = outcome.action;
        }

        return Ok(());
    }

    pub async fn start(
        self: Arc<Self>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let service = Arc::clone(&self);
            let worker_tx = tx.clone();
            tokio::spawn(async move {
                if let Err(err) = service.dispatch(action, &worker_tx).await {
                    tracing::error!(error = ?err, "Failed to deliver action result");
                }
            });
        }

        return Ok(());
    }
}
