/// Every user editable input in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Field {
    TextInput,
    BulletsInput,
    UrlInput,
    FileInput,
    Tone,
    Content,
    PublishAccount,
    ModalAccount,
    ModalScheduleTime,
    ScheduledContent,
    PageAccount,
    PageScheduleTime,
}

impl Field {
    pub fn title(&self) -> &'static str {
        match self {
            Field::TextInput => return "Text",
            Field::BulletsInput => return "Bullet points (one per line)",
            Field::UrlInput => return "URL",
            Field::FileInput => return "File path",
            Field::Tone => return "Tone",
            Field::Content => return "Edit content",
            Field::PublishAccount | Field::ModalAccount | Field::PageAccount => {
                return "LinkedIn account"
            }
            Field::ModalScheduleTime | Field::PageScheduleTime => {
                return "Date and time (YYYY-MM-DDTHH:MM)"
            }
            Field::ScheduledContent => return "Post content",
        }
    }

    /// Selector fields cycle through a fixed set of values instead of taking
    /// free text.
    pub fn is_selector(&self) -> bool {
        return self.is_account() || *self == Field::Tone;
    }

    pub fn is_account(&self) -> bool {
        return matches!(
            self,
            Field::PublishAccount | Field::ModalAccount | Field::PageAccount
        );
    }

    pub fn is_multiline(&self) -> bool {
        return matches!(
            self,
            Field::TextInput | Field::BulletsInput | Field::Content | Field::ScheduledContent
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Modal {
    Publish,
    Schedule,
}

impl Modal {
    pub fn fields(&self) -> Vec<Field> {
        match self {
            Modal::Publish => return vec![Field::PublishAccount],
            Modal::Schedule => return vec![Field::ModalAccount, Field::ModalScheduleTime],
        }
    }
}

/// Buttons whose label and enabled state are driven by the flows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum Control {
    Generate,
    Copy,
    ConfirmPublish,
    ConfirmSchedule,
    SaveSchedule,
}

impl Control {
    pub fn default_label(&self) -> &'static str {
        match self {
            Control::Generate => return "Generate",
            Control::Copy => return "Copy",
            Control::ConfirmPublish => return "Publish",
            Control::ConfirmSchedule => return "Schedule",
            Control::SaveSchedule => return "Schedule Post",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

impl ButtonState {
    pub fn idle(label: &str) -> ButtonState {
        return ButtonState {
            label: label.to_string(),
            disabled: false,
        };
    }

    pub fn busy(label: &str) -> ButtonState {
        return ButtonState {
            label: label.to_string(),
            disabled: true,
        };
    }

    pub fn restored(control: Control) -> ButtonState {
        return ButtonState::idle(control.default_label());
    }
}
