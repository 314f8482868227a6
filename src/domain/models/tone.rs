#[cfg(test)]
#[path = "tone_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Stylistic parameter forwarded to the content generation service.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    EnumVariantNames,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Inspirational,
    Storytelling,
    Humorous,
}

impl Tone {
    pub fn parse(text: &str) -> Option<Tone> {
        return Tone::iter().find(|e| return e.to_string() == text);
    }

    pub fn next(&self) -> Tone {
        let all = Tone::iter().collect::<Vec<_>>();
        let idx = all.iter().position(|t| return t == self).unwrap_or(0);
        return all[(idx + 1) % all.len()];
    }

    pub fn prev(&self) -> Tone {
        let all = Tone::iter().collect::<Vec<_>>();
        let idx = all.iter().position(|t| return t == self).unwrap_or(0);
        return all[(idx + all.len() - 1) % all.len()];
    }
}
