use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use tui_textarea::CursorMove;

use super::Field;

pub struct TextArea {}

impl<'a> TextArea {
    /// Text area pre-filled with `value` for editing `field`, cursor at the end.
    pub fn for_field(field: Field, value: &str) -> tui_textarea::TextArea<'a> {
        let mut textarea =
            tui_textarea::TextArea::new(value.split('\n').map(|e| return e.to_string()).collect());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Yellow))
                .title(field.title())
                .padding(Padding::new(1, 1, 0, 0)),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);

        return textarea;
    }

    pub fn text(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }
}
