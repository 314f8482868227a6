#[cfg(test)]
#[path = "page_test.rs"]
mod tests;

use strum::EnumIter;
use strum::IntoEnumIterator;

/// Top level pages reachable from the navigation bar. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, strum::Display)]
pub enum Page {
    Dashboard,
    #[default]
    Generate,
    Schedule,
}

impl Page {
    pub fn index(&self) -> usize {
        return Page::iter().position(|p| return p == *self).unwrap_or(0);
    }

    pub fn from_function_key(n: u8) -> Option<Page> {
        if n == 0 {
            return None;
        }

        return Page::iter().nth(usize::from(n - 1));
    }

    pub fn titles() -> Vec<String> {
        return Page::iter()
            .enumerate()
            .map(|(idx, page)| return format!("F{} {page}", idx + 1))
            .collect();
    }
}
