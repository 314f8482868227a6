#[cfg(test)]
#[path = "source_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

use super::Field;

/// Where the generation input comes from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceType {
    #[default]
    Text,
    Bullets,
    Url,
    File,
}

impl SourceType {
    pub fn title(&self) -> &'static str {
        match self {
            SourceType::Text => return "Text",
            SourceType::Bullets => return "Bullet Points",
            SourceType::Url => return "URL",
            SourceType::File => return "File",
        }
    }

    /// The form field that supplies data for this source.
    pub fn input_field(&self) -> Field {
        match self {
            SourceType::Text => return Field::TextInput,
            SourceType::Bullets => return Field::BulletsInput,
            SourceType::Url => return Field::UrlInput,
            SourceType::File => return Field::FileInput,
        }
    }

    pub fn next(&self) -> SourceType {
        let all = SourceType::iter().collect::<Vec<_>>();
        let idx = all.iter().position(|s| return s == self).unwrap_or(0);
        return all[(idx + 1) % all.len()];
    }

    pub fn index(&self) -> usize {
        return SourceType::iter()
            .position(|s| return s == *self)
            .unwrap_or(0);
    }
}
