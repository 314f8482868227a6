#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

use crate::domain::models::ScrollMove;

/// Vertical offset into a pane whose content can be taller than the space it
/// is drawn in. Lengths are refreshed on every draw through `set_state`.
#[derive(Debug, Default)]
pub struct Scroll {
    content_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.content_length.saturating_sub(self.viewport_length);
    }

    fn page(&self) -> u16 {
        return self.viewport_length.saturating_sub(1).max(1);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(self.max_position().saturating_add(1))
            .viewport_content_length(self.viewport_length)
            .position(self.position);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.sync_scrollbar();
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.page());
        self.sync_scrollbar();
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn down_page(&mut self) {
        self.position = self
            .position
            .saturating_add(self.page())
            .min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn first(&mut self) {
        self.position = 0;
        self.sync_scrollbar();
    }

    pub fn apply(&mut self, movement: ScrollMove) {
        match movement {
            ScrollMove::Up => self.up(),
            ScrollMove::Down => self.down(),
            ScrollMove::PageUp => self.up_page(),
            ScrollMove::PageDown => self.down_page(),
        }
    }

    pub fn is_scrollable(&self) -> bool {
        return self.content_length > self.viewport_length;
    }

    /// Records how many lines the pane holds and how many fit on screen,
    /// pulling the position back if the content shrank.
    pub fn set_state(&mut self, content_length: u16, viewport_length: u16) {
        self.content_length = content_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.sync_scrollbar();
    }
}
