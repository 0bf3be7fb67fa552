// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use profview_app::{
    BrowserState, Line as ProfileLine, NavEvent, ProfileError, ProfileView, ResourceResolver,
    ResourceStatus, Session,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::collections::BTreeSet;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const APP_TITLE: &str = "Professor Profile Viewer";
const ROSTER_WIDTH: u16 = 34;
const SCROLL_STEP: u16 = 10;
const EXPANDED_MARK: &str = "▾";
const COLLAPSED_MARK: &str = "▸";
const CURRENT_MARK: &str = "▶";
const HIGHLIGHT_COLOR: Color = Color::Rgb(255, 165, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub show_roster: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self { show_roster: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    roster_cursor: usize,
    shown_index: Option<usize>,
    view: Option<ProfileView>,
    expanded: BTreeSet<String>,
    scroll: u16,
    show_roster: bool,
    help_visible: bool,
    name_prompt: Option<String>,
    status_line: Option<String>,
    status_token: u64,
}

impl ViewData {
    fn new(options: UiOptions) -> Self {
        Self {
            show_roster: options.show_roster,
            ..Self::default()
        }
    }
}

pub fn run_app<R: ResourceResolver>(
    browser: &mut BrowserState<R>,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();
    info!("browser started");

    let mut result = Ok(());
    loop {
        process_internal_events(&mut view_data, &internal_rx);
        if let Some(session) = browser.session() {
            sync_view_to_session(&mut view_data, session);
        }

        if let Err(error) = terminal.draw(|frame| render(frame, browser, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(browser, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("browser stopped");
    result
}

fn process_internal_events(view_data: &mut ViewData, rx: &Receiver<InternalEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                view_data.status_line = None;
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    view_data.status_line = Some(message.into());
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

/// Reprojects the profile and resets per-record view state, but only when the
/// session cursor moved. Frames draw from the cached view.
fn sync_view_to_session<R: ResourceResolver>(view_data: &mut ViewData, session: &Session<R>) {
    let current = session.current_index();
    if view_data.shown_index == Some(current) && view_data.view.is_some() {
        return;
    }
    view_data.shown_index = Some(current);
    view_data.view = Some(session.render_current());
    view_data.roster_cursor = current;
    view_data.expanded.clear();
    view_data.scroll = 0;
}

fn handle_key_event<R: ResourceResolver>(
    browser: &mut BrowserState<R>,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if let Some(input) = view_data.name_prompt.as_mut() {
        match key.code {
            KeyCode::Esc => {
                view_data.name_prompt = None;
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => {
                let name = input.trim().to_owned();
                view_data.name_prompt = None;
                if !name.is_empty()
                    && let Some(session) = browser.session_mut()
                {
                    let result = session.jump_to_name(&name);
                    report_navigation(view_data, internal_tx, session, result);
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(ch);
            }
            _ => {}
        }
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Esc, _) => {
            view_data.status_line = None;
            return false;
        }
        _ => {}
    }

    let Some(session) = browser.session_mut() else {
        return false;
    };
    sync_view_to_session(view_data, session);

    match (key.code, key.modifiers) {
        (KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Right, KeyModifiers::NONE) => {
            if matches!(session.next(), NavEvent::Unchanged { .. }) {
                emit_status(view_data, internal_tx, "already at last profile");
            }
            sync_view_to_session(view_data, session);
        }
        (KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::Left, KeyModifiers::NONE) => {
            if matches!(session.prev(), NavEvent::Unchanged { .. }) {
                emit_status(view_data, internal_tx, "already at first profile");
            }
            sync_view_to_session(view_data, session);
        }
        (KeyCode::Char('j') | KeyCode::Down, KeyModifiers::NONE) => {
            let last = session.record_count().saturating_sub(1);
            view_data.roster_cursor = (view_data.roster_cursor + 1).min(last);
        }
        (KeyCode::Char('k') | KeyCode::Up, KeyModifiers::NONE) => {
            view_data.roster_cursor = view_data.roster_cursor.saturating_sub(1);
        }
        (KeyCode::Enter, _) => {
            let result = session.jump_to_index(view_data.roster_cursor);
            report_navigation(view_data, internal_tx, session, result);
        }
        (KeyCode::Char('g') | KeyCode::Home, _) => {
            let result = session.jump_to_index(0);
            report_navigation(view_data, internal_tx, session, result);
        }
        (KeyCode::Char('G') | KeyCode::End, _) => {
            let last = session.record_count().saturating_sub(1);
            let result = session.jump_to_index(last);
            report_navigation(view_data, internal_tx, session, result);
        }
        (KeyCode::Char('/'), _) => {
            view_data.name_prompt = Some(String::new());
        }
        (KeyCode::Char(digit @ '1'..='9'), KeyModifiers::NONE) => {
            let position = digit as usize - '1' as usize;
            let toggled = view_data
                .view
                .as_ref()
                .and_then(|view| toggle_collapsible(view, &mut view_data.expanded, position));
            match toggled {
                Some(title) => emit_status(view_data, internal_tx, title),
                None => emit_status(
                    view_data,
                    internal_tx,
                    format!("no collapsible section {digit}"),
                ),
            }
            clamp_scroll(view_data);
        }
        (KeyCode::Char('e'), KeyModifiers::NONE) => {
            let message = match view_data.view.as_ref() {
                Some(view) => toggle_all_collapsible(view, &mut view_data.expanded),
                None => "no collapsible sections",
            };
            emit_status(view_data, internal_tx, message);
            clamp_scroll(view_data);
        }
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            view_data.scroll = view_data.scroll.saturating_add(SCROLL_STEP);
            clamp_scroll(view_data);
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
            view_data.scroll = view_data.scroll.saturating_sub(SCROLL_STEP);
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            view_data.show_roster = !view_data.show_roster;
        }
        _ => {}
    }

    false
}

fn report_navigation<R: ResourceResolver>(
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    session: &Session<R>,
    result: Result<NavEvent, ProfileError>,
) {
    match result {
        Ok(event) => debug!(?event, "navigated"),
        Err(error) => emit_status(view_data, internal_tx, error.to_string()),
    }
    sync_view_to_session(view_data, session);
}

// Keeps at least the last profile line on screen.
fn clamp_scroll(view_data: &mut ViewData) {
    let line_count = view_data
        .view
        .as_ref()
        .map_or(0, |view| profile_lines(view, &view_data.expanded).len());
    let max_scroll = u16::try_from(line_count.saturating_sub(1)).unwrap_or(u16::MAX);
    view_data.scroll = view_data.scroll.min(max_scroll);
}

fn toggle_collapsible(
    view: &ProfileView,
    expanded: &mut BTreeSet<String>,
    position: usize,
) -> Option<String> {
    let section = view.collapsible_sections().nth(position)?;
    if expanded.remove(&section.key) {
        Some(format!("{} collapsed", section.title))
    } else {
        expanded.insert(section.key.clone());
        Some(format!("{} expanded", section.title))
    }
}

fn toggle_all_collapsible(view: &ProfileView, expanded: &mut BTreeSet<String>) -> &'static str {
    let keys = view
        .collapsible_sections()
        .map(|section| section.key.clone())
        .collect::<Vec<_>>();
    if keys.is_empty() {
        return "no collapsible sections";
    }
    if keys.iter().all(|key| expanded.contains(key)) {
        for key in &keys {
            expanded.remove(key);
        }
        "sections collapsed"
    } else {
        expanded.extend(keys);
        "sections expanded"
    }
}

fn render<R: ResourceResolver>(
    frame: &mut ratatui::Frame<'_>,
    browser: &BrowserState<R>,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(browser))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().title("profview").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    match browser {
        BrowserState::Ready(session) => render_session(frame, layout[1], session, view_data),
        BrowserState::Unavailable { reason } => {
            let body = Paragraph::new(unavailable_text(reason))
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("no data").borders(Borders::ALL));
            frame.render_widget(body, layout[1]);
        }
    }

    let status = Paragraph::new(status_text(browser, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_session<R: ResourceResolver>(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    session: &Session<R>,
    view_data: &ViewData,
) {
    let profile_area = if view_data.show_roster {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(ROSTER_WIDTH), Constraint::Min(1)])
            .split(area);

        let visible_rows = usize::from(columns[0].height.saturating_sub(2));
        let offset = roster_offset(view_data.roster_cursor, visible_rows);
        let roster = Paragraph::new(roster_lines(
            &session.names(),
            session.current_index(),
            view_data.roster_cursor,
        ))
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        .block(Block::default().title("navigation").borders(Borders::ALL));
        frame.render_widget(roster, columns[0]);
        columns[1]
    } else {
        area
    };

    let empty;
    let view = match view_data.view.as_ref() {
        Some(view) => view,
        None => {
            empty = ProfileView {
                record_index: session.current_index(),
                sections: Vec::new(),
            };
            &empty
        }
    };
    let title = session
        .current_record()
        .and_then(|record| record.name())
        .unwrap_or("profile")
        .to_owned();
    let profile = Paragraph::new(profile_lines(view, &view_data.expanded))
        .wrap(Wrap { trim: false })
        .scroll((view_data.scroll, 0))
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(profile, profile_area);
}

fn header_text<R: ResourceResolver>(browser: &BrowserState<R>) -> String {
    match browser.session() {
        Some(session) => format!(
            "{APP_TITLE} | {}",
            position_label(session.current_index(), session.record_count())
        ),
        None => APP_TITLE.to_owned(),
    }
}

fn position_label(index: usize, count: usize) -> String {
    format!("Showing {} of {count} professors", index + 1)
}

// Roster rows start after the two-line summary header.
fn roster_offset(cursor: usize, visible_rows: usize) -> usize {
    let row = cursor + 2;
    if visible_rows == 0 || row < visible_rows {
        0
    } else {
        row + 1 - visible_rows
    }
}

fn roster_lines(names: &[String], current: usize, cursor: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(position_label(current, names.len())),
        Line::from(String::new()),
    ];
    lines.extend(names.iter().enumerate().map(|(index, name)| {
        let marker = if index == current { CURRENT_MARK } else { " " };
        let mut style = Style::default();
        if index == current {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if index == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Line::from(Span::styled(format!("{marker} {name}"), style))
    }));
    lines
}

fn profile_lines(view: &ProfileView, expanded: &BTreeSet<String>) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    let mut collapsible_position = 0usize;

    for section in &view.sections {
        if !lines.is_empty() {
            lines.push(Line::from(String::new()));
        }

        if section.collapsed {
            collapsible_position += 1;
            let open = expanded.contains(&section.key);
            let mark = if open { EXPANDED_MARK } else { COLLAPSED_MARK };
            lines.push(Line::from(Span::styled(
                format!(
                    "{mark} [{collapsible_position}] {} ({})",
                    section.title,
                    section.lines.len()
                ),
                heading,
            )));
            if !open {
                continue;
            }
        } else {
            lines.push(Line::from(Span::styled(section.title.clone(), heading)));
        }

        lines.extend(section.lines.iter().map(render_profile_line));
    }

    if lines.is_empty() {
        lines.push(Line::from("(no details recorded for this profile)"));
    }
    lines
}

fn render_profile_line(line: &ProfileLine) -> Line<'static> {
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    match line {
        ProfileLine::Text {
            label: Some(label),
            text,
        } => Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::raw(text.clone()),
        ]),
        ProfileLine::Text { label: None, text } => Line::from(text.clone()),
        ProfileLine::Bullet {
            text,
            highlighted: false,
        } => Line::from(format!("• {text}")),
        ProfileLine::Bullet {
            text,
            highlighted: true,
        } => Line::from(Span::styled(
            format!("• {text}"),
            Style::default()
                .fg(HIGHLIGHT_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        ProfileLine::Link { label, target } => Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            Span::styled(
                target.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        ProfileLine::Resource { path, status } => Line::from(resource_text(path, *status)),
    }
}

fn resource_text(path: &str, status: ResourceStatus) -> String {
    match status {
        ResourceStatus::Loaded { bytes } => format!("[photo] {path} ({})", format_size(bytes)),
        ResourceStatus::Unresolved => format!("[photo] {path}"),
        ResourceStatus::Placeholder { reason } => format!("📷 {}", reason.message()),
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KIB {
        format!("{bytes} B")
    } else if value < KIB * KIB {
        format!("{:.1} KiB", value / KIB)
    } else {
        format!("{:.1} MiB", value / (KIB * KIB))
    }
}

fn unavailable_text(reason: &str) -> String {
    format!("Profile data unavailable.\n\n{reason}\n\nq quit | ? help")
}

fn status_text<R: ResourceResolver>(browser: &BrowserState<R>, view_data: &ViewData) -> String {
    if let Some(input) = &view_data.name_prompt {
        return format!("jump to name: {input}_ | enter jump | esc cancel");
    }
    if view_data.help_visible {
        return String::new();
    }

    let hints = match browser {
        BrowserState::Ready(_) => {
            "n/p next/prev | j/k enter roster | / name | g/G first/last | 1-9 e sections | r roster | ? help | q quit"
        }
        BrowserState::Unavailable { .. } => "? help | q quit",
    };
    match &view_data.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | ? help | esc clear status\n\
profile: n/l/right next | p/h/left prev | g/home first | G/end last\n\
roster: j/k or up/down move | enter open highlighted | r show/hide\n\
name jump: / type a name | enter jump | esc cancel\n\
sections: 1-9 expand/collapse numbered section | e expand/collapse all\n\
scroll: ctrl+d/pgdn down | ctrl+u/pgup up"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
