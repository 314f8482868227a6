#[cfg(test)]
#[path = "handlers_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use super::schedule_time::default_schedule_time;
use super::UiState;
use crate::domain::models::Action;
use crate::domain::models::ButtonState;
use crate::domain::models::Completion;
use crate::domain::models::Control;
use crate::domain::models::Deferred;
use crate::domain::models::Field;
use crate::domain::models::GenerateContentRequest;
use crate::domain::models::GenerateJob;
use crate::domain::models::Modal;
use crate::domain::models::Page;
use crate::domain::models::PublishJob;
use crate::domain::models::ScheduleJob;
use crate::domain::models::ScheduleOrigin;
use crate::domain::models::ScheduleRequest;
use crate::domain::models::ScrollMove;
use crate::domain::models::ScrollPane;
use crate::domain::models::SourceType;
use crate::domain::models::UiEvent;
use crate::domain::models::UiUpdate;
use crate::domain::models::UploadRequest;

pub const COPY_RESET_DELAY: Duration = Duration::from_millis(2000);

pub const MSG_SELECT_ACCOUNT: &str = "Please select a LinkedIn account";
pub const MSG_SELECT_TIME: &str = "Please select a date and time";
pub const MSG_ENTER_CONTENT: &str = "Please enter content for your post";
pub const MSG_SELECT_FILE: &str = "Please select a file to upload";
pub const MSG_COPY_FAILED: &str = "Failed to copy content";
pub const MSG_PUBLISHED: &str = "Post published successfully!";
pub const MSG_SCHEDULED: &str = "Post scheduled successfully!";

/// What a handler wants done: UI updates to apply right away, updates to apply
/// later, and at most one side effect for the actions service.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub updates: Vec<UiUpdate>,
    pub deferred: Vec<Deferred>,
    pub action: Option<Action>,
}

impl Outcome {
    fn updates(updates: Vec<UiUpdate>) -> Outcome {
        return Outcome {
            updates,
            ..Outcome::default()
        };
    }

    fn alert(message: &str) -> Outcome {
        return Outcome::updates(vec![UiUpdate::Alert(message.to_string())]);
    }

    fn action(action: Action) -> Outcome {
        return Outcome {
            action: Some(action),
            ..Outcome::default()
        };
    }

    fn busy(control: Control, label: &str, action: Action) -> Outcome {
        return Outcome {
            updates: vec![UiUpdate::SetButton(control, ButtonState::busy(label))],
            action: Some(action),
            ..Outcome::default()
        };
    }
}

fn navigate(page: Page) -> Outcome {
    let action = match page {
        Page::Dashboard => Some(Action::FetchDashboard),
        Page::Generate => None,
        Page::Schedule => Some(Action::FetchUpcoming),
    };

    return Outcome {
        updates: vec![UiUpdate::ActivatePage(page)],
        action,
        ..Outcome::default()
    };
}

fn focus_next(state: &UiState) -> Outcome {
    let fields = state.focusable_fields();
    if fields.is_empty() {
        return Outcome::default();
    }

    let next = match state.focus.and_then(|f| return fields.iter().position(|e| return *e == f)) {
        Some(idx) => fields[(idx + 1) % fields.len()],
        None => fields[0],
    };

    return Outcome::updates(vec![UiUpdate::Focus(Some(next))]);
}

fn cycle_account(state: &UiState, field: Field, forward: bool) -> Outcome {
    let mut ids = vec!["".to_string()];
    ids.extend(state.accounts.iter().map(|a| return a.id.to_string()));

    let current = state.value(field);
    let idx = ids.iter().position(|id| return *id == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % ids.len()
    } else {
        (idx + ids.len() - 1) % ids.len()
    };

    return Outcome::updates(vec![UiUpdate::SetField(field, ids[next].to_string())]);
}

fn cycle_selector(state: &UiState, forward: bool) -> Outcome {
    match state.focus {
        Some(Field::Tone) => {
            let tone = if forward {
                state.tone.next()
            } else {
                state.tone.prev()
            };
            return Outcome::updates(vec![UiUpdate::SetTone(tone)]);
        }
        Some(field) if field.is_account() => {
            return cycle_account(state, field, forward);
        }
        _ => return Outcome::default(),
    }
}

fn generate(state: &UiState) -> Outcome {
    if state.button(Control::Generate).disabled {
        return Outcome::default();
    }

    let job = match state.source {
        SourceType::File => {
            let path = state.value(Field::FileInput);
            if path.trim().is_empty() {
                return Outcome::alert(MSG_SELECT_FILE);
            }

            GenerateJob::Upload(UploadRequest {
                path: PathBuf::from(path.trim()),
                tone: state.tone,
            })
        }
        source => GenerateJob::Content(GenerateContentRequest {
            source_type: source,
            source_data: state.value(source.input_field()),
            tone: state.tone,
        }),
    };

    return Outcome::busy(Control::Generate, "Generating...", Action::Generate(job));
}

fn copy(state: &UiState) -> Outcome {
    if let Some(content) = &state.content {
        return Outcome::action(Action::Copy(content.to_string()));
    }

    return Outcome::default();
}

fn edit(state: &UiState) -> Outcome {
    if let Some(buffer) = &state.editing {
        return Outcome::updates(vec![UiUpdate::CommitEdit(buffer.to_string())]);
    }

    if let Some(content) = &state.content {
        return Outcome::updates(vec![UiUpdate::BeginEdit(content.to_string())]);
    }

    return Outcome::default();
}

fn open_modal(state: &UiState, modal: Modal) -> Outcome {
    if state.content.is_none() || state.modal.is_some() {
        return Outcome::default();
    }

    return Outcome::updates(vec![UiUpdate::OpenModal(modal)]);
}

fn confirm_publish(state: &UiState) -> Outcome {
    if state.modal != Some(Modal::Publish) || state.button(Control::ConfirmPublish).disabled {
        return Outcome::default();
    }

    let account_id = state.value(Field::PublishAccount);
    if account_id.is_empty() {
        return Outcome::alert(MSG_SELECT_ACCOUNT);
    }

    return Outcome::busy(
        Control::ConfirmPublish,
        "Publishing...",
        Action::Publish(PublishJob {
            content: state.content.clone().unwrap_or_default(),
            account_id,
        }),
    );
}

fn confirm_schedule(state: &UiState) -> Outcome {
    if state.modal != Some(Modal::Schedule) || state.button(Control::ConfirmSchedule).disabled {
        return Outcome::default();
    }

    let account_id = state.value(Field::ModalAccount);
    let scheduled_time = state.value(Field::ModalScheduleTime);
    if account_id.is_empty() {
        return Outcome::alert(MSG_SELECT_ACCOUNT);
    }
    if scheduled_time.trim().is_empty() {
        return Outcome::alert(MSG_SELECT_TIME);
    }

    return Outcome::busy(
        Control::ConfirmSchedule,
        "Scheduling...",
        Action::Schedule(ScheduleJob {
            origin: ScheduleOrigin::Modal,
            request: ScheduleRequest {
                content: state.content.clone().unwrap_or_default(),
                scheduled_time: scheduled_time.trim().to_string(),
                linkedin_account: account_id,
            },
            refresh_upcoming: state.page == Page::Schedule,
        }),
    );
}

fn save_schedule(state: &UiState) -> Outcome {
    if state.button(Control::SaveSchedule).disabled {
        return Outcome::default();
    }

    let content = state.value(Field::ScheduledContent);
    let account_id = state.value(Field::PageAccount);
    let scheduled_time = state.value(Field::PageScheduleTime);
    if content.is_empty() {
        return Outcome::alert(MSG_ENTER_CONTENT);
    }
    if account_id.is_empty() {
        return Outcome::alert(MSG_SELECT_ACCOUNT);
    }
    if scheduled_time.trim().is_empty() {
        return Outcome::alert(MSG_SELECT_TIME);
    }

    return Outcome::busy(
        Control::SaveSchedule,
        "Scheduling...",
        Action::Schedule(ScheduleJob {
            origin: ScheduleOrigin::Page,
            request: ScheduleRequest {
                content,
                scheduled_time: scheduled_time.trim().to_string(),
                linkedin_account: account_id,
            },
            refresh_upcoming: true,
        }),
    );
}

fn scroll(state: &UiState, movement: ScrollMove) -> Outcome {
    let pane = match state.page {
        Page::Generate if state.content.is_some() && state.editing.is_none() => {
            ScrollPane::Content
        }
        Page::Schedule => ScrollPane::Upcoming,
        _ => return Outcome::default(),
    };

    return Outcome::updates(vec![UiUpdate::Scroll(pane, movement)]);
}

/// Maps a user interaction onto the updates and side effect it causes.
pub fn handle(state: &UiState, event: UiEvent) -> Outcome {
    tracing::debug!(event = ?event, "ui event");

    match event {
        UiEvent::Navigate(page) => return navigate(page),
        UiEvent::SelectSource(source) => {
            return Outcome::updates(vec![UiUpdate::ActivateSource(source)]);
        }
        UiEvent::NextSource => {
            return Outcome::updates(vec![UiUpdate::ActivateSource(state.source.next())]);
        }
        UiEvent::FocusNext => return focus_next(state),
        UiEvent::FieldChanged(field, value) => {
            return Outcome::updates(vec![UiUpdate::SetField(field, value)]);
        }
        UiEvent::SelectNext => return cycle_selector(state, true),
        UiEvent::SelectPrev => return cycle_selector(state, false),
        UiEvent::Scroll(movement) => return scroll(state, movement),
        UiEvent::Generate | UiEvent::Regenerate => return generate(state),
        UiEvent::Copy => return copy(state),
        UiEvent::Edit => return edit(state),
        UiEvent::OpenPublish => return open_modal(state, Modal::Publish),
        UiEvent::OpenSchedule { now } => {
            let mut outcome = open_modal(state, Modal::Schedule);
            if !outcome.updates.is_empty() {
                outcome.updates.push(UiUpdate::SetField(
                    Field::ModalScheduleTime,
                    default_schedule_time(now),
                ));
            }
            return outcome;
        }
        UiEvent::ConfirmPublish => return confirm_publish(state),
        UiEvent::ConfirmSchedule => return confirm_schedule(state),
        UiEvent::CloseModal => {
            let updates = state.modal.map(UiUpdate::CloseModal).into_iter().collect();
            return Outcome::updates(updates);
        }
        UiEvent::SaveSchedule => return save_schedule(state),
        UiEvent::RefreshUpcoming => return Outcome::action(Action::FetchUpcoming),
        UiEvent::RefreshDashboard => return Outcome::action(Action::FetchDashboard),
        UiEvent::DismissAlert => return Outcome::updates(vec![UiUpdate::DismissAlert]),
    }
}

fn restore(control: Control) -> UiUpdate {
    return UiUpdate::SetButton(control, ButtonState::restored(control));
}

/// Maps the result of an action onto UI updates. Every flow that disabled a
/// control restores it here, success or not.
pub fn complete(completion: Completion) -> Outcome {
    match completion {
        Completion::Generated(Ok(content)) => {
            return Outcome::updates(vec![
                UiUpdate::ShowContent(content),
                restore(Control::Generate),
            ]);
        }
        Completion::Generated(Err(err)) => {
            tracing::error!(error = ?err, "Error generating content");
            return Outcome::updates(vec![
                UiUpdate::Alert(format!("Error generating content: {err}")),
                restore(Control::Generate),
            ]);
        }
        Completion::Copied(Ok(())) => {
            return Outcome {
                updates: vec![UiUpdate::Copied],
                deferred: vec![Deferred {
                    delay: COPY_RESET_DELAY,
                    update: UiUpdate::CopyExpired,
                }],
                action: None,
            };
        }
        Completion::Copied(Err(err)) => {
            tracing::error!(error = ?err, "Error copying content");
            return Outcome::alert(MSG_COPY_FAILED);
        }
        Completion::Published(Ok(res)) => {
            tracing::info!(post_id = ?res.post_id, "Published post");
            return Outcome::updates(vec![
                UiUpdate::CloseModal(Modal::Publish),
                UiUpdate::Alert(MSG_PUBLISHED.to_string()),
                restore(Control::ConfirmPublish),
            ]);
        }
        Completion::Published(Err(err)) => {
            tracing::error!(error = ?err, "Error publishing content");
            return Outcome::updates(vec![
                UiUpdate::Alert(format!("Error publishing content: {err}")),
                restore(Control::ConfirmPublish),
            ]);
        }
        Completion::Scheduled {
            origin,
            refresh_upcoming,
            result,
        } => {
            let control = match origin {
                ScheduleOrigin::Modal => Control::ConfirmSchedule,
                ScheduleOrigin::Page => Control::SaveSchedule,
            };

            if let Err(err) = result {
                tracing::error!(error = ?err, "Error scheduling post");
                return Outcome::updates(vec![
                    UiUpdate::Alert(format!("Error scheduling post: {err}")),
                    restore(control),
                ]);
            }

            let mut updates = match origin {
                ScheduleOrigin::Modal => vec![UiUpdate::CloseModal(Modal::Schedule)],
                ScheduleOrigin::Page => vec![
                    UiUpdate::SetField(Field::ScheduledContent, "".to_string()),
                    UiUpdate::SetField(Field::PageScheduleTime, "".to_string()),
                ],
            };
            updates.push(UiUpdate::Alert(MSG_SCHEDULED.to_string()));
            updates.push(restore(control));

            return Outcome {
                updates,
                deferred: vec![],
                action: refresh_upcoming.then_some(Action::FetchUpcoming),
            };
        }
        Completion::Upcoming(Ok(posts)) => {
            return Outcome::updates(vec![UiUpdate::ShowUpcoming(posts)]);
        }
        Completion::Upcoming(Err(err)) => {
            tracing::error!(error = ?err, "Error fetching upcoming posts");
            return Outcome::default();
        }
        Completion::Dashboard(Ok(summary)) => {
            return Outcome::updates(vec![UiUpdate::ShowDashboard(summary)]);
        }
        Completion::Dashboard(Err(err)) => {
            tracing::error!(error = ?err, "Error fetching dashboard data");
            return Outcome::default();
        }
    }
}
