#[cfg(test)]
#[path = "keymap_test.rs"]
mod tests;

use chrono::NaiveDateTime;
use tui_textarea::Input;
use tui_textarea::Key;

use super::UiState;
use crate::domain::models::Field;
use crate::domain::models::Modal;
use crate::domain::models::Page;
use crate::domain::models::ScrollMove;
use crate::domain::models::UiEvent;

#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Event(UiEvent),
    /// Forward the key to the text area of the focused field.
    Edit,
    Quit,
    Ignore,
}

pub fn help_text(page: Page) -> &'static str {
    match page {
        Page::Dashboard => return "F1-F3 pages | Ctrl+L refresh | Ctrl+C quit",
        Page::Generate => {
            return "F1-F3 pages | Tab focus | Ctrl+T source | Ctrl+G generate | PgUp/PgDn scroll | Ctrl+R regenerate | Ctrl+Y copy | Ctrl+E edit/save | Ctrl+P publish | Ctrl+S schedule | Ctrl+C quit";
        }
        Page::Schedule => {
            return "F1-F3 pages | Tab focus | Ctrl+S schedule post | Ctrl+L refresh | PgUp/PgDn scroll | Ctrl+C quit";
        }
    }
}

fn focused_selector(state: &UiState) -> bool {
    return state.focus.map(|f| return f.is_selector()).unwrap_or(false);
}

fn focused_text(state: &UiState) -> bool {
    return state.focus.map(|f| return !f.is_selector()).unwrap_or(false);
}

fn focused_single_line(state: &UiState) -> bool {
    return state
        .focus
        .map(|f| return !f.is_selector() && !f.is_multiline())
        .unwrap_or(false);
}

/// Up and Down belong to text areas while one has focus. Page keys scroll
/// unless the generated content itself is being edited.
fn map_scroll(state: &UiState, input: &Input) -> Option<ScrollMove> {
    let editing_content = state.focus == Some(Field::Content);

    match input.key {
        Key::Up if !focused_text(state) => return Some(ScrollMove::Up),
        Key::Down if !focused_text(state) => return Some(ScrollMove::Down),
        Key::PageUp if !editing_content => return Some(ScrollMove::PageUp),
        Key::PageDown if !editing_content => return Some(ScrollMove::PageDown),
        _ => return None,
    }
}

fn map_modal(state: &UiState, modal: Modal, input: &Input) -> KeyAction {
    match input {
        Input { key: Key::Esc, .. } => return KeyAction::Event(UiEvent::CloseModal),
        Input {
            key: Key::Enter, ..
        } => {
            let event = match modal {
                Modal::Publish => UiEvent::ConfirmPublish,
                Modal::Schedule => UiEvent::ConfirmSchedule,
            };
            return KeyAction::Event(event);
        }
        Input { key: Key::Tab, .. } => return KeyAction::Event(UiEvent::FocusNext),
        Input { key: Key::Left, .. } if focused_selector(state) => {
            return KeyAction::Event(UiEvent::SelectPrev);
        }
        Input {
            key: Key::Right, ..
        } if focused_selector(state) => {
            return KeyAction::Event(UiEvent::SelectNext);
        }
        _ if focused_text(state) => return KeyAction::Edit,
        _ => return KeyAction::Ignore,
    }
}

fn map_page(state: &UiState, input: &Input, now: NaiveDateTime) -> Option<UiEvent> {
    if !input.ctrl {
        return None;
    }

    let key = match input.key {
        Key::Char(c) => c,
        _ => return None,
    };

    match (state.page, key) {
        (Page::Generate, 't') => return Some(UiEvent::NextSource),
        (Page::Generate, 'g') => return Some(UiEvent::Generate),
        (Page::Generate, 'r') => return Some(UiEvent::Regenerate),
        (Page::Generate, 'y') => return Some(UiEvent::Copy),
        (Page::Generate, 'e') => return Some(UiEvent::Edit),
        (Page::Generate, 'p') => return Some(UiEvent::OpenPublish),
        (Page::Generate, 's') => return Some(UiEvent::OpenSchedule { now }),
        (Page::Schedule, 's') => return Some(UiEvent::SaveSchedule),
        (Page::Schedule, 'l') => return Some(UiEvent::RefreshUpcoming),
        (Page::Dashboard, 'l') => return Some(UiEvent::RefreshDashboard),
        _ => return None,
    }
}

/// Decides what a key press means in the current UI state. Alerts block all
/// other input until dismissed, modals capture input while open.
pub fn map_input(state: &UiState, input: &Input, now: NaiveDateTime) -> KeyAction {
    if let Input {
        key: Key::Char('c'),
        ctrl: true,
        ..
    } = input
    {
        return KeyAction::Quit;
    }

    if state.alert().is_some() {
        return KeyAction::Event(UiEvent::DismissAlert);
    }

    if let Some(modal) = state.modal {
        return map_modal(state, modal, input);
    }

    if let Input {
        key: Key::F(n), ..
    } = input
    {
        if let Some(page) = Page::from_function_key(*n) {
            return KeyAction::Event(UiEvent::Navigate(page));
        }
        return KeyAction::Ignore;
    }

    if let Some(event) = map_page(state, input, now) {
        return KeyAction::Event(event);
    }

    if let Some(movement) = map_scroll(state, input) {
        return KeyAction::Event(UiEvent::Scroll(movement));
    }

    match input {
        Input { key: Key::Tab, .. } => return KeyAction::Event(UiEvent::FocusNext),
        Input { key: Key::Left, .. } if focused_selector(state) => {
            return KeyAction::Event(UiEvent::SelectPrev);
        }
        Input {
            key: Key::Right, ..
        } if focused_selector(state) => {
            return KeyAction::Event(UiEvent::SelectNext);
        }
        Input {
            key: Key::Enter, ..
        } if focused_single_line(state) => return KeyAction::Ignore,
        _ if focused_text(state) => return KeyAction::Edit,
        _ => return KeyAction::Ignore,
    }
}
