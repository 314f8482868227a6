use chrono::NaiveDateTime;
use tui_textarea::Input;

use super::Field;
use super::Page;
use super::ScrollMove;
use super::SourceType;
use super::UiUpdate;

/// Everything the UI loop reacts to.
pub enum Event {
    KeyboardInput(Input),
    KeyboardPaste(String),
    Updates(Vec<UiUpdate>),
    UITick(),
}

/// Typed user interactions, the payload handed to `handlers::handle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(Page),
    SelectSource(SourceType),
    NextSource,
    FocusNext,
    FieldChanged(Field, String),
    SelectNext,
    SelectPrev,
    Scroll(ScrollMove),
    Generate,
    Regenerate,
    Copy,
    Edit,
    OpenPublish,
    OpenSchedule { now: NaiveDateTime },
    ConfirmPublish,
    ConfirmSchedule,
    CloseModal,
    SaveSchedule,
    RefreshUpcoming,
    RefreshDashboard,
    DismissAlert,
}
