use std::time::Duration;

use super::ButtonState;
use super::Control;
use super::DashboardSummary;
use super::Field;
use super::Modal;
use super::Page;
use super::SourceType;
use super::Tone;
use super::UpcomingPost;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMove {
    Up,
    Down,
    PageUp,
    PageDown,
}

/// Panes that can hold more lines than fit on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPane {
    Content,
    Upcoming,
}

/// A single mutation of the UI. Handlers describe what should change by
/// returning these, `UiState::apply` is the only place they take effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiUpdate {
    ActivatePage(Page),
    ActivateSource(SourceType),
    Focus(Option<Field>),
    SetField(Field, String),
    SetTone(Tone),
    SetButton(Control, ButtonState),
    /// Shows `Copied!` on the copy control and starts a restore timer.
    Copied,
    /// A restore timer ran out. The label only reverts once every timer has.
    CopyExpired,
    /// Reveals the result card with the given text and scrolls it into view.
    ShowContent(String),
    BeginEdit(String),
    CommitEdit(String),
    OpenModal(Modal),
    /// Closes the modal only while it is still the one open.
    CloseModal(Modal),
    Scroll(ScrollPane, ScrollMove),
    ShowUpcoming(Vec<UpcomingPost>),
    ShowDashboard(DashboardSummary),
    Alert(String),
    DismissAlert,
}

/// An update to apply once `delay` has passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deferred {
    pub delay: Duration,
    pub update: UiUpdate,
}
