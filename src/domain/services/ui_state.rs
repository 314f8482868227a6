#[cfg(test)]
#[path = "ui_state_test.rs"]
mod tests;

use std::collections::HashMap;
use std::collections::VecDeque;

use super::Scroll;
use crate::domain::models::Account;
use crate::domain::models::ButtonState;
use crate::domain::models::Control;
use crate::domain::models::DashboardSummary;
use crate::domain::models::Field;
use crate::domain::models::Modal;
use crate::domain::models::Page;
use crate::domain::models::ScrollPane;
use crate::domain::models::SourceType;
use crate::domain::models::Tone;
use crate::domain::models::UiUpdate;
use crate::domain::models::UpcomingPost;

/// All transient state of the front end. Nothing here is persisted, the
/// server owns every post.
pub struct UiState {
    pub page: Page,
    pub source: SourceType,
    pub tone: Tone,
    pub focus: Option<Field>,
    pub accounts: Vec<Account>,
    pub modal: Option<Modal>,
    /// Generated text, `None` while the result card is hidden.
    pub content: Option<String>,
    /// Edit buffer while the result card is in edit mode.
    pub editing: Option<String>,
    pub scroll_to_content: bool,
    pub content_scroll: Scroll,
    pub upcoming_scroll: Scroll,
    pub upcoming: Option<Vec<UpcomingPost>>,
    pub dashboard: Option<DashboardSummary>,
    pub alerts: VecDeque<String>,
    copy_timers: usize,
    fields: HashMap<Field, String>,
    buttons: HashMap<Control, ButtonState>,
}

impl UiState {
    pub fn new(tone: Tone, accounts: Vec<Account>) -> UiState {
        return UiState {
            page: Page::default(),
            source: SourceType::default(),
            tone,
            focus: None,
            accounts,
            modal: None,
            content: None,
            editing: None,
            scroll_to_content: false,
            content_scroll: Scroll::default(),
            upcoming_scroll: Scroll::default(),
            upcoming: None,
            dashboard: None,
            alerts: VecDeque::new(),
            copy_timers: 0,
            fields: HashMap::new(),
            buttons: HashMap::new(),
        };
    }

    pub fn is_page_active(&self, page: Page) -> bool {
        return self.page == page;
    }

    pub fn is_source_active(&self, source: SourceType) -> bool {
        return self.source == source;
    }

    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Tone => return self.tone.to_string(),
            Field::Content => return self.editing.clone().unwrap_or_default(),
            _ => {
                return self
                    .fields
                    .get(&field)
                    .map(|e| return e.to_string())
                    .unwrap_or_default();
            }
        }
    }

    pub fn button(&self, control: Control) -> ButtonState {
        return self
            .buttons
            .get(&control)
            .cloned()
            .unwrap_or_else(|| return ButtonState::restored(control));
    }

    pub fn alert(&self) -> Option<&String> {
        return self.alerts.front();
    }

    /// Display name for the account selected in `field`.
    pub fn account_label(&self, field: Field) -> String {
        let id = self.value(field);
        if id.is_empty() {
            return "Select an account".to_string();
        }

        return self
            .accounts
            .iter()
            .find(|a| return a.id == id)
            .map(|a| return format!("{} ({})", a.name, a.id))
            .unwrap_or(id);
    }

    /// Fields that can take focus in the current context, in tab order.
    pub fn focusable_fields(&self) -> Vec<Field> {
        if let Some(modal) = self.modal {
            return modal.fields();
        }

        match self.page {
            Page::Dashboard => return vec![],
            Page::Generate => {
                if self.editing.is_some() {
                    return vec![Field::Content];
                }

                return vec![self.source.input_field(), Field::Tone];
            }
            Page::Schedule => {
                return vec![
                    Field::ScheduledContent,
                    Field::PageAccount,
                    Field::PageScheduleTime,
                ];
            }
        }
    }

    pub fn apply_all(&mut self, updates: Vec<UiUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    pub fn apply(&mut self, update: UiUpdate) {
        tracing::debug!(update = ?update, "apply");

        match update {
            UiUpdate::ActivatePage(page) => {
                self.page = page;
                self.focus = None;
            }
            UiUpdate::ActivateSource(source) => {
                self.source = source;
                self.focus = Some(source.input_field());
            }
            UiUpdate::Focus(field) => {
                self.focus = field;
            }
            UiUpdate::SetField(Field::Content, value) => {
                self.editing = Some(value);
            }
            UiUpdate::SetField(Field::Tone, value) => {
                if let Some(tone) = Tone::parse(&value) {
                    self.tone = tone;
                }
            }
            UiUpdate::SetField(field, value) => {
                self.fields.insert(field, value);
            }
            UiUpdate::SetTone(tone) => {
                self.tone = tone;
            }
            UiUpdate::SetButton(control, state) => {
                self.buttons.insert(control, state);
            }
            UiUpdate::Copied => {
                self.copy_timers += 1;
                self.buttons
                    .insert(Control::Copy, ButtonState::idle("Copied!"));
            }
            UiUpdate::CopyExpired => {
                self.copy_timers = self.copy_timers.saturating_sub(1);
                if self.copy_timers == 0 {
                    self.buttons
                        .insert(Control::Copy, ButtonState::restored(Control::Copy));
                }
            }
            UiUpdate::ShowContent(content) => {
                self.content = Some(content);
                self.editing = None;
                self.scroll_to_content = true;
                self.content_scroll.first();
                if self.focus == Some(Field::Content) {
                    self.focus = None;
                }
            }
            UiUpdate::BeginEdit(content) => {
                self.editing = Some(content);
                self.focus = Some(Field::Content);
            }
            UiUpdate::CommitEdit(content) => {
                self.content = Some(content);
                self.editing = None;
                self.focus = None;
            }
            UiUpdate::OpenModal(modal) => {
                self.modal = Some(modal);
                self.focus = modal.fields().first().copied();
            }
            UiUpdate::CloseModal(modal) => {
                if self.modal == Some(modal) {
                    self.modal = None;
                    self.focus = None;
                }
            }
            UiUpdate::Scroll(ScrollPane::Content, movement) => {
                self.content_scroll.apply(movement);
            }
            UiUpdate::Scroll(ScrollPane::Upcoming, movement) => {
                self.upcoming_scroll.apply(movement);
            }
            UiUpdate::ShowUpcoming(posts) => {
                self.upcoming = Some(posts);
                self.upcoming_scroll.first();
            }
            UiUpdate::ShowDashboard(summary) => {
                self.dashboard = Some(summary);
            }
            UiUpdate::Alert(message) => {
                self.alerts.push_back(message);
            }
            UiUpdate::DismissAlert => {
                self.alerts.pop_front();
            }
        }
    }
}
