#[cfg(test)]
#[path = "ui_test.rs"]
mod tests;

use std::io;

use anyhow::Result;
use chrono::Local;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Margin;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Tabs;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio::time;

use crate::configuration::Config;
use crate::domain::models::Account;
use crate::domain::models::Action;
use crate::domain::models::Control;
use crate::domain::models::Event;
use crate::domain::models::Field;
use crate::domain::models::Modal;
use crate::domain::models::Page;
use crate::domain::models::SourceType;
use crate::domain::models::TextArea;
use crate::domain::models::UiEvent;
use crate::domain::services::events::EventsService;
use crate::domain::services::handlers;
use crate::domain::services::handlers::Outcome;
use crate::domain::services::keymap;
use crate::domain::services::keymap::KeyAction;
use crate::domain::services::Scroll;
use crate::domain::services::UiState;

const MODAL_HELP: &str = "Enter confirm | Esc cancel | Tab focus | Left/Right select";

/// Text area bound to whichever free text field currently has focus.
struct Editor<'a> {
    field: Option<Field>,
    textarea: tui_textarea::TextArea<'a>,
}

impl<'a> Editor<'a> {
    fn new() -> Editor<'a> {
        return Editor {
            field: None,
            textarea: tui_textarea::TextArea::default(),
        };
    }

    /// Rebinds the text area when focus moves or the field value changed
    /// underneath it, such as a form reset after scheduling.
    fn sync(&mut self, state: &UiState) {
        match state.focus.filter(|f| return !f.is_selector()) {
            Some(field) => {
                let value = state.value(field);
                if self.field != Some(field) || TextArea::text(&self.textarea) != value {
                    self.textarea = TextArea::for_field(field, &value);
                    self.field = Some(field);
                }
            }
            None => {
                self.field = None;
            }
        }
    }
}

/// Word wraps `text` to `width` columns. Words longer than a line are split.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = vec![];

    for source in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;

        for word in source.split(' ') {
            let mut chars = word.chars().collect::<Vec<char>>();
            if line_len > 0 && line_len + 1 + chars.len() > width {
                lines.push(line);
                line = String::new();
                line_len = 0;
            }

            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }

            while line_len + chars.len() > width {
                let rest = chars.split_off(width - line_len);
                line.extend(chars);
                lines.push(line);
                line = String::new();
                line_len = 0;
                chars = rest;
            }

            line_len += chars.len();
            line.extend(chars);
        }

        lines.push(line);
    }

    return lines;
}

/// Draws `lines` inside `block` starting at the scroll position, with a
/// scrollbar on the right border when they don't fit.
fn render_scrolled<B: Backend>(
    frame: &mut Frame<B>,
    lines: Vec<Line<'static>>,
    block: Block<'static>,
    scroll: &mut Scroll,
    area: Rect,
) {
    let inner = block.inner(area);
    scroll.set_state(
        u16::try_from(lines.len()).unwrap_or(u16::MAX),
        inner.height,
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.position, 0));
    frame.render_widget(paragraph, area);

    if scroll.is_scrollable() {
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scroll.scrollbar_state,
        );
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    return Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
}

fn field_block(state: &UiState, field: Field) -> Block<'static> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(field.title())
        .padding(Padding::new(1, 1, 0, 0));

    if state.focus == Some(field) {
        block = block
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Yellow));
    }

    return block;
}

fn render_field<B: Backend>(
    frame: &mut Frame<B>,
    state: &UiState,
    editor: &Editor,
    field: Field,
    area: Rect,
) {
    if editor.field == Some(field) {
        frame.render_widget(editor.textarea.widget(), area);
        return;
    }

    let text = match field {
        Field::Tone => format!("< {} >", state.tone),
        _ if field.is_account() => format!("< {} >", state.account_label(field)),
        _ => state.value(field),
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(field_block(state, field));
    frame.render_widget(paragraph, area);
}

fn button(state: &UiState, control: Control, hotkey: &str) -> Span<'static> {
    let button = state.button(control);
    let style = if button.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };

    return Span::styled(format!("[ {} {hotkey} ]", button.label), style);
}

fn plain_button(label: &str, hotkey: &str) -> Span<'static> {
    return Span::styled(
        format!("[ {label} {hotkey} ]"),
        Style::default().fg(Color::Cyan),
    );
}

fn render_navigation<B: Backend>(frame: &mut Frame<B>, state: &UiState, area: Rect) {
    let tabs = Tabs::new(Page::titles())
        .select(state.page.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title("linkpost"),
        );
    frame.render_widget(tabs, area);
}

fn render_generate<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut UiState,
    editor: &Editor,
    area: Rect,
) {
    let input_field = state.source.input_field();
    let input_height = if input_field.is_multiline() { 8 } else { 3 };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(input_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(area);

    let sources = Tabs::new(
        SourceType::iter()
            .map(|e| return e.title().to_string())
            .collect::<Vec<String>>(),
    )
    .select(state.source.index())
    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Source (Ctrl+T)"),
    );
    frame.render_widget(sources, layout[0]);

    render_field(frame, state, editor, input_field, layout[1]);
    render_field(frame, state, editor, Field::Tone, layout[2]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![button(state, Control::Generate, "Ctrl+G")])),
        layout[3],
    );

    render_result(frame, state, editor, layout[4]);
}

fn render_result<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut UiState,
    editor: &Editor,
    area: Rect,
) {
    let content = match &state.content {
        Some(content) => content.to_string(),
        None => {
            let hint = Paragraph::new("Generated content appears here.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().padding(Padding::new(1, 1, 1, 0)));
            frame.render_widget(hint, area);
            return;
        }
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    if state.editing.is_some() {
        render_field(frame, state, editor, Field::Content, layout[0]);
    } else {
        let title = if state.scroll_to_content {
            "Generated content (new)"
        } else {
            "Generated content"
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
        if state.scroll_to_content {
            block = block.border_style(Style::default().fg(Color::LightGreen));
        }

        let width = usize::from(block.inner(layout[0]).width);
        let lines = wrap_lines(&content, width)
            .into_iter()
            .map(Line::from)
            .collect::<Vec<Line>>();
        render_scrolled(frame, lines, block, &mut state.content_scroll, layout[0]);
    }

    let edit_label = if state.editing.is_some() { "Save" } else { "Edit" };
    let buttons = Line::from(vec![
        plain_button("Regenerate", "Ctrl+R"),
        Span::raw(" "),
        button(state, Control::Copy, "Ctrl+Y"),
        Span::raw(" "),
        plain_button(edit_label, "Ctrl+E"),
        Span::raw(" "),
        plain_button("Publish", "Ctrl+P"),
        Span::raw(" "),
        plain_button("Schedule", "Ctrl+S"),
    ]);
    frame.render_widget(Paragraph::new(buttons), layout[1]);
}

fn render_schedule<B: Backend>(
    frame: &mut Frame<B>,
    state: &mut UiState,
    editor: &Editor,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(columns[0]);

    render_field(frame, state, editor, Field::ScheduledContent, form[0]);
    render_field(frame, state, editor, Field::PageAccount, form[1]);
    render_field(frame, state, editor, Field::PageScheduleTime, form[2]);
    frame.render_widget(
        Paragraph::new(Line::from(vec![button(state, Control::SaveSchedule, "Ctrl+S")])),
        form[3],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Upcoming posts (Ctrl+L)")
        .padding(Padding::new(1, 1, 0, 0));

    let width = usize::from(block.inner(columns[1]).width);
    let lines = match &state.upcoming {
        None => vec![Line::from("Loading...")],
        Some(posts) if posts.is_empty() => vec![Line::from("No scheduled posts")],
        Some(posts) => posts
            .iter()
            .flat_map(|post| {
                return vec![
                    Line::from(Span::styled(
                        post.display_time(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(post.first_line(width)),
                    Line::from(""),
                ];
            })
            .collect(),
    };

    render_scrolled(frame, lines, block, &mut state.upcoming_scroll, columns[1]);
}

fn render_dashboard<B: Backend>(frame: &mut Frame<B>, state: &UiState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Dashboard (Ctrl+L)")
        .padding(Padding::new(1, 1, 1, 0));

    let lines = match &state.dashboard {
        None => vec![Line::from("Loading dashboard...")],
        Some(summary) if summary.stats.is_empty() => {
            vec![Line::from("No dashboard data available.")]
        }
        Some(summary) => summary
            .stats
            .iter()
            .map(|(key, value)| {
                return Line::from(vec![
                    Span::styled(
                        format!("{key}: "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value.to_string()),
                ]);
            })
            .collect(),
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_modal<B: Backend>(
    frame: &mut Frame<B>,
    state: &UiState,
    editor: &Editor,
    modal: Modal,
    area: Rect,
) {
    let fields = modal.fields();
    let hint_height = if state.accounts.is_empty() { 2 } else { 0 };
    let height = (fields.len() as u16) * 3 + 1 + hint_height + 2;
    let rect = centered_rect(64, height, area);

    let (title, control) = match modal {
        Modal::Publish => ("Publish to LinkedIn", Control::ConfirmPublish),
        Modal::Schedule => ("Schedule Post", Control::ConfirmSchedule),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(title);
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let mut constraints = fields
        .iter()
        .map(|_| return Constraint::Length(3))
        .collect::<Vec<Constraint>>();
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(hint_height));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in fields.iter().enumerate() {
        render_field(frame, state, editor, *field, layout[idx]);
    }

    let buttons = Line::from(vec![
        button(state, control, "Enter"),
        Span::raw(" "),
        plain_button("Cancel", "Esc"),
    ]);
    frame.render_widget(Paragraph::new(buttons), layout[fields.len()]);

    if hint_height > 0 {
        let hint = Paragraph::new(
            "No LinkedIn accounts configured. Add [[accounts]] to your config file.",
        )
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, layout[fields.len() + 1]);
    }
}

fn render_alert<B: Backend>(frame: &mut Frame<B>, message: &str, area: Rect) {
    let width = 60u16.min(area.width);
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let lines = message
        .split('\n')
        .map(|line| return (line.chars().count().max(1) + text_width - 1) / text_width)
        .sum::<usize>();
    let height = u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(4);
    let rect = centered_rect(width, height, area);

    let paragraph = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::LightRed))
            .title("linkpost")
            .padding(Padding::new(1, 1, 0, 0)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(paragraph, rect);
}

fn render<B: Backend>(frame: &mut Frame<B>, state: &mut UiState, editor: &Editor) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_navigation(frame, state, layout[0]);

    match state.page {
        Page::Dashboard => render_dashboard(frame, state, layout[1]),
        Page::Generate => render_generate(frame, state, editor, layout[1]),
        Page::Schedule => render_schedule(frame, state, editor, layout[1]),
    }

    let help = if state.modal.is_some() {
        MODAL_HELP
    } else {
        keymap::help_text(state.page)
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        layout[2],
    );

    if let Some(modal) = state.modal {
        render_modal(frame, state, editor, modal, layout[1]);
    }

    if let Some(message) = state.alert() {
        let size = frame.size();
        render_alert(frame, message, size);
    }
}

/// Applies an outcome to the UI state and forwards its side effects.
fn apply_outcome(
    state: &mut UiState,
    outcome: Outcome,
    action_tx: &mpsc::UnboundedSender<Action>,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    state.apply_all(outcome.updates);

    for deferred in outcome.deferred {
        let deferred_tx = event_tx.clone();
        tokio::spawn(async move {
            time::sleep(deferred.delay).await;
            let _ = deferred_tx.send(Event::Updates(vec![deferred.update]));
        });
    }

    if let Some(action) = outcome.action {
        action_tx.send(action)?;
    }

    return Ok(());
}

fn edit_field(
    state: &mut UiState,
    editor: &Editor,
    action_tx: &mpsc::UnboundedSender<Action>,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    if let Some(field) = editor.field {
        let event = UiEvent::FieldChanged(field, TextArea::text(&editor.textarea));
        let outcome = handlers::handle(state, event);
        apply_outcome(state, outcome, action_tx, event_tx)?;
    }

    return Ok(());
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut UiState,
    events: &mut EventsService,
    action_tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let mut editor = Editor::new();

    #[cfg(feature = "dev")]
    {
        let test_str = "Rust 1.75 shipped async fn in traits. We migrated three services in a week and deleted a pile of boxed futures.";
        let outcome = handlers::handle(
            state,
            UiEvent::FieldChanged(Field::TextInput, test_str.to_string()),
        );
        apply_outcome(state, outcome, &action_tx, &event_tx)?;
    }

    loop {
        editor.sync(state);
        terminal.draw(|frame| return render(frame, state, &editor))?;

        match events.next().await? {
            Event::KeyboardInput(input) => {
                state.scroll_to_content = false;
                let now = Local::now().naive_local();
                match keymap::map_input(state, &input, now) {
                    KeyAction::Quit => break,
                    KeyAction::Ignore => (),
                    KeyAction::Event(event) => {
                        let outcome = handlers::handle(state, event);
                        apply_outcome(state, outcome, &action_tx, &event_tx)?;
                    }
                    KeyAction::Edit => {
                        if editor.field.is_some() {
                            editor.textarea.input(input);
                            edit_field(state, &editor, &action_tx, &event_tx)?;
                        }
                    }
                }
            }
            Event::KeyboardPaste(text) => {
                if let (None, Some(field)) = (state.alert(), editor.field) {
                    let text = text.replace('\r', "");
                    if field.is_multiline() {
                        for (idx, line) in text.split('\n').enumerate() {
                            if idx > 0 {
                                editor.textarea.insert_newline();
                            }
                            editor.textarea.insert_str(line);
                        }
                    } else {
                        editor.textarea.insert_str(text.replace('\n', " "));
                    }
                    edit_field(state, &editor, &action_tx, &event_tx)?;
                }
            }
            Event::Updates(updates) => {
                state.apply_all(updates);
            }
            Event::UITick() => (),
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    action_tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,
    event_rx: mpsc::UnboundedReceiver<Event>,
    accounts: Vec<Account>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut state = UiState::new(Config::tone(), accounts);
    let mut events = EventsService::new(event_rx);

    start_loop(&mut terminal, &mut state, &mut events, action_tx, event_tx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
