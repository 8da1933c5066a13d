use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io::stdout;
use tracing::warn;

use crate::controller::{Confirm, Controller, Notify};
use crate::form::FormField;
use crate::models::{Filter, Status};
use crate::store::RecordStore;
use crate::view::{Card, View};

// --- Front-end capabilities ---

/// Asks on the bottom terminal row and blocks until y/n.
pub struct KeyPrompt;

impl Confirm for KeyPrompt {
    fn confirm(&mut self, prompt: &str) -> bool {
        let (_, rows) = terminal::size().unwrap_or((80, 24));
        let mut out = stdout();
        let shown = out
            .execute(MoveTo(0, rows.saturating_sub(1)))
            .and_then(|o| o.execute(Clear(ClearType::CurrentLine)))
            .and_then(|o| o.execute(Print(format!(" {} (y/n) ", prompt))));
        if let Err(e) = shown {
            warn!("Failed to show confirmation prompt: {}", e);
            return false;
        }

        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return true,
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read confirmation key: {}", e);
                    return false;
                }
            }
        }
    }
}

/// Last message shown in the footer until the next key press.
#[derive(Default)]
pub struct StatusLine {
    message: Option<String>,
}

impl StatusLine {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn clear(&mut self) {
        self.message = None;
    }
}

impl Notify for StatusLine {
    fn notify(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

type App = Controller<KeyPrompt, StatusLine>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Edit(FormField),
}

struct AppState {
    selected: usize,
    mode: Mode,
}

impl AppState {
    fn new() -> Self {
        Self {
            selected: 0,
            mode: Mode::Browse,
        }
    }

    fn next(&mut self, count: usize) {
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

pub fn run_tracker(store: RecordStore, filter: Filter) -> Result<()> {
    let mut app = Controller::new(store, KeyPrompt, StatusLine::default());
    app.init();
    if filter != Filter::All {
        app.select_filter(filter);
    }

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    let mut state = AppState::new();
    let mut list_state = ListState::default();

    loop {
        state.clamp(app.view().cards().len());
        list_state.select(match app.view() {
            View::Cards(_) => Some(state.selected),
            View::Empty(_) => None,
        });
        terminal.draw(|frame| draw(frame, app, &state, &mut list_state))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        app.notifier_mut().clear();

        match state.mode {
            Mode::Browse => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(app.view().cards().len()),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Right | KeyCode::Char('l') => {
                    let i = (app.filter().index() + 1) % Filter::CHOICES.len();
                    app.select_filter(Filter::CHOICES[i]);
                    state.selected = 0;
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    let n = Filter::CHOICES.len();
                    let i = (app.filter().index() + n - 1) % n;
                    app.select_filter(Filter::CHOICES[i]);
                    state.selected = 0;
                }
                KeyCode::Char(c @ '1'..='5') => {
                    let i = c as usize - '1' as usize;
                    app.select_filter(Filter::CHOICES[i]);
                    state.selected = 0;
                }
                KeyCode::Char('a') | KeyCode::Char('i') => {
                    state.mode = Mode::Edit(FormField::Company);
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(card) = app.view().cards().get(state.selected) {
                        let id = card.id;
                        app.request_delete(id);
                        // the prompt was written around ratatui, force a full repaint
                        terminal.clear()?;
                    }
                }
                _ => {}
            },
            Mode::Edit(field) => match key.code {
                KeyCode::Esc => state.mode = Mode::Browse,
                KeyCode::Tab | KeyCode::Down => state.mode = Mode::Edit(field.next()),
                KeyCode::BackTab | KeyCode::Up => state.mode = Mode::Edit(field.prev()),
                KeyCode::Enter => match app.submit() {
                    Ok(_) => state.mode = Mode::Edit(FormField::Company),
                    Err(e) => app.notifier_mut().notify(&e.to_string()),
                },
                KeyCode::Right | KeyCode::Char(' ') if field == FormField::Status => {
                    let form = app.form_mut();
                    form.status = form.status.next();
                }
                KeyCode::Left if field == FormField::Status => {
                    let form = app.form_mut();
                    form.status = form.status.prev();
                }
                KeyCode::Backspace => {
                    if let Some(text) = app.form_mut().text_mut(field) {
                        text.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(text) = app.form_mut().text_mut(field) {
                        text.push(c);
                    }
                }
                _ => {}
            },
        }
    }
    Ok(())
}

fn status_style(status: Status) -> Style {
    match status {
        Status::Applied => Style::default().fg(Color::Cyan),
        Status::Interview => Style::default().fg(Color::Yellow),
        Status::Offer => Style::default().fg(Color::Green),
        Status::Rejected => Style::default().fg(Color::Red),
    }
}

fn draw(frame: &mut Frame, app: &App, state: &AppState, list_state: &mut ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Counters
    let mut spans = Vec::new();
    for (label, value) in app.stats().counters() {
        spans.push(Span::styled(
            format!(" {} ", value),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!("{}   ", label)));
    }
    let stats = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Job Application Tracker "));
    frame.render_widget(stats, rows[0]);

    // Filter bar, exactly one highlighted
    let tabs = Tabs::new(Filter::CHOICES.iter().map(|f| f.label()))
        .block(Block::default().borders(Borders::ALL).title(" Filter "))
        .select(app.filter().index())
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, rows[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[2]);

    frame.render_widget(build_form(app, state.mode), body[0]);

    let title = format!(" Applications ({}) ", app.view().cards().len());
    match app.view() {
        View::Cards(cards) => {
            let width = body[1].width.saturating_sub(6).max(20) as usize;
            let items: Vec<ListItem> = cards.iter().map(|c| card_item(c, width)).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, body[1], list_state);
        }
        View::Empty(empty) => {
            let text = Text::from(vec![
                Line::from(""),
                Line::from(Span::styled(
                    empty.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(empty.hint, Style::default().fg(Color::DarkGray))),
            ]);
            let placeholder = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(placeholder, body[1]);
        }
    }

    // Footer: notification or key help
    let footer = match app.notifier().message() {
        Some(message) => Paragraph::new(format!(" {}", message))
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        None => {
            let help = match state.mode {
                Mode::Browse => {
                    " j/k:navigate  h/l or 1-5:filter  a:add  d:delete  q:quit"
                }
                Mode::Edit(FormField::Status) => {
                    " left/right:change status  tab:next field  enter:save  esc:done"
                }
                Mode::Edit(_) => " tab/shift-tab:field  enter:save  esc:done",
            };
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray))
        }
    };
    frame.render_widget(footer, rows[3]);
}

fn build_form(app: &App, mode: Mode) -> Paragraph<'_> {
    let form = app.form();
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::ALL {
        let editing = mode == Mode::Edit(field);
        let marker = if field.required() { "*" } else { "" };
        let label_style = if editing {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", field.label(), marker),
            label_style,
        )));

        let value = form.value(field);
        let shown = match (field, editing) {
            (FormField::Status, true) => format!("< {} >", value),
            (_, true) => format!("{}_", value),
            _ => value.to_string(),
        };
        let value_style = if field == FormField::Status {
            status_style(form.status)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {}", shown), value_style)));
    }

    let title = match mode {
        Mode::Browse => " Add Application (a) ",
        Mode::Edit(_) => " Add Application ",
    };
    Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
}

fn card_item(card: &Card, width: usize) -> ListItem<'static> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            card.company.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  #{}", card.id), Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::from(card.position.clone()));

    for (label, value) in &card.details {
        lines.push(Line::from(format!("  {}: {}", label, value)));
    }
    lines.push(Line::from(vec![
        Span::raw("  Status: "),
        Span::styled(card.status_label(), status_style(card.status)),
    ]));

    if let Some(notes) = &card.notes {
        for line in textwrap::wrap(&format!("\"{}\"", notes), width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", line),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
    }
    lines.push(Line::from(""));

    ListItem::new(Text::from(lines))
}
