use std::collections::HashSet;

use anyhow::Result;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use super::render;
use super::wrap_lines;
use super::Editor;
use crate::domain::models::Page;
use crate::domain::models::ScrollMove;
use crate::domain::models::Tone;
use crate::domain::models::UiEvent;
use crate::domain::models::UiUpdate;
use crate::domain::models::UpcomingPost;
use crate::domain::services::handlers;
use crate::domain::services::UiState;

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    return buffer
        .content
        .chunks(usize::from(buffer.area.width))
        .map(|row| {
            return row
                .iter()
                .map(|cell| return cell.symbol.as_str())
                .collect::<String>();
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn press(state: &mut UiState, movement: ScrollMove) {
    let outcome = handlers::handle(state, UiEvent::Scroll(movement));
    state.apply_all(outcome.updates);
}

#[test]
fn it_wraps_on_word_boundaries() {
    assert_eq!(
        wrap_lines("Ship it today please", 10),
        vec!["Ship it", "today", "please"]
    );
    assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap_lines("one\n\ntwo", 20), vec!["one", "", "two"]);
}

#[test]
fn it_scrolls_through_long_generated_content() -> Result<()> {
    let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
    let mut state = UiState::new(Tone::default(), vec![]);
    let editor = Editor::new();

    let post = (1..=12)
        .map(|n| return format!("Line {n:02}"))
        .collect::<Vec<String>>()
        .join("\n");
    state.apply(UiUpdate::ShowContent(post));

    terminal.draw(|frame| return render(frame, &mut state, &editor))?;
    assert!(!screen_text(&terminal).contains("Line 12"));

    let mut seen = HashSet::new();
    for _ in 0..12 {
        terminal.draw(|frame| return render(frame, &mut state, &editor))?;
        let screen = screen_text(&terminal);
        for n in 1..=12 {
            if screen.contains(&format!("Line {n:02}")) {
                seen.insert(n);
            }
        }
        press(&mut state, ScrollMove::Down);
    }

    assert_eq!(seen.len(), 12);
    assert!(state.content_scroll.position > 0);

    state.apply(UiUpdate::ShowContent("Fresh draft".to_string()));
    assert_eq!(state.content_scroll.position, 0);
    terminal.draw(|frame| return render(frame, &mut state, &editor))?;
    assert!(screen_text(&terminal).contains("Fresh draft"));

    return Ok(());
}

#[test]
fn it_scrolls_through_upcoming_posts() -> Result<()> {
    let mut terminal = Terminal::new(TestBackend::new(80, 24))?;
    let mut state = UiState::new(Tone::default(), vec![]);
    let editor = Editor::new();

    let posts = (1..=8)
        .map(|n| {
            return UpcomingPost {
                scheduled_time: format!("2024-03-0{n}T09:00"),
                content: format!("Post number {n}"),
            };
        })
        .collect::<Vec<UpcomingPost>>();
    state.apply(UiUpdate::ActivatePage(Page::Schedule));
    state.apply(UiUpdate::ShowUpcoming(posts));

    terminal.draw(|frame| return render(frame, &mut state, &editor))?;
    let screen = screen_text(&terminal);
    assert!(screen.contains("Post number 1"));
    assert!(!screen.contains("Post number 8"));

    press(&mut state, ScrollMove::PageDown);
    terminal.draw(|frame| return render(frame, &mut state, &editor))?;
    assert!(screen_text(&terminal).contains("Post number 8"));

    return Ok(());
}
