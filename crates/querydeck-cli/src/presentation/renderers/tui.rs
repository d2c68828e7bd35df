//! Dashboard renderer.
//!
//! Owns the terminal, the session state machine and the per-result
//! components. Network jobs go out over one channel to a worker thread and
//! come back as ticketed completions; the session decides whether a
//! completion still applies. The renderer never blocks on the network.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use querydeck_runtime::{Phase, QueryTicket, Session};
use querydeck_types::{ConnectionConfig, Error as BackendError, QueryResult, SchemaInfo};

use crate::presentation::presenters::present_result;
use crate::presentation::view_models::{ResultViewModel, Section, StatusLevel};
use crate::presentation::views::tui::components::{
    ChartComponent, PromptAction, PromptComponent, TableComponent,
};

/// Network work sent to the worker thread.
pub enum Job {
    Connect(ConnectionConfig, QueryTicket),
    Query(ConnectionConfig, String, QueryTicket),
    RefreshSchema(ConnectionConfig),
}

/// Worker results fed back into the session.
pub enum Completion {
    Connect(QueryTicket, std::result::Result<SchemaInfo, BackendError>),
    Query(QueryTicket, std::result::Result<QueryResult, BackendError>),
    Schema(std::result::Result<SchemaInfo, BackendError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Prompt,
    Table,
    Chart,
}

pub struct DashRenderer {
    session: Session,
    /// Kept outside the session so a failed connect can be retried.
    connection: ConnectionConfig,
    jobs: Sender<Job>,

    prompt: PromptComponent,
    table: Option<TableComponent>,
    chart: Option<ChartComponent>,
    result_vm: Option<ResultViewModel>,
    /// Revision of the result the components were built from.
    applied_revision: u64,

    focus: Focus,
    notification: Option<String>,
    should_quit: bool,
}

impl DashRenderer {
    pub fn new(session: Session, connection: ConnectionConfig, jobs: Sender<Job>) -> Self {
        Self {
            session,
            connection,
            jobs,
            prompt: PromptComponent::new(),
            table: None,
            chart: None,
            result_vm: None,
            applied_revision: 0,
            focus: Focus::Prompt,
            notification: None,
            should_quit: false,
        }
    }

    pub fn run(mut self, completions: Receiver<Completion>) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal on SIGINT from outside the key loop
        ctrlc::set_handler(move || {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            std::process::exit(0);
        })?;

        let result = self.event_loop(&mut terminal, completions);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        completions: Receiver<Completion>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }

            while let Ok(completion) = completions.try_recv() {
                self.apply_completion(completion);
            }
            self.sync_components();

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key.code == KeyCode::Tab {
            self.cycle_focus();
            return;
        }

        let typing =
            self.focus == Focus::Prompt || self.table.as_ref().is_some_and(|t| t.searching());

        if !typing {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('x') => {
                    self.session.disconnect();
                    self.notification = Some("disconnected".to_string());
                    return;
                }
                KeyCode::Char('r') if self.session.phase() == Phase::Disconnected => {
                    self.reconnect();
                    return;
                }
                KeyCode::Char('s') if self.session.is_connected() => {
                    if let Some(config) = self.session.config().cloned() {
                        let _ = self.jobs.send(Job::RefreshSchema(config));
                    }
                    return;
                }
                KeyCode::Char(c @ '1'..='9') => {
                    self.replay_suggestion(c as usize - '1' as usize);
                    return;
                }
                _ => {}
            }
        } else if self.focus == Focus::Prompt && key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }

        match self.focus {
            Focus::Prompt => {
                if let Some(PromptAction::Submit(question)) = self.prompt.handle_input(key) {
                    self.submit(&question);
                }
            }
            Focus::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.handle_input(key);
                }
            }
            Focus::Chart => {
                if let Some(chart) = self.chart.as_mut() {
                    chart.handle_input(key);
                }
            }
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Prompt if self.table.is_some() => Focus::Table,
            Focus::Prompt if self.chart.is_some() => Focus::Chart,
            Focus::Prompt => Focus::Prompt,
            Focus::Table if self.chart.is_some() => Focus::Chart,
            Focus::Table => Focus::Prompt,
            Focus::Chart => Focus::Prompt,
        };
    }

    /// One submit path for typed questions and replayed suggestions. The
    /// session is the sole gatekeeper: in-flight queries, pending uploads
    /// and blank input all make `begin_query` a no-op.
    fn submit(&mut self, question: &str) {
        let Some(ticket) = self.session.begin_query(question) else {
            return;
        };
        if let Some(config) = self.session.config().cloned() {
            let _ = self
                .jobs
                .send(Job::Query(config, question.to_string(), ticket));
            self.prompt.clear();
        }
    }

    fn replay_suggestion(&mut self, index: usize) {
        let suggestion = self
            .result_vm
            .as_ref()
            .and_then(|vm| vm.suggestions().get(index).cloned());
        if let Some(question) = suggestion {
            self.prompt.set_text(&question);
            self.submit(&question);
        }
    }

    fn reconnect(&mut self) {
        match self.session.begin_connect(self.connection.clone()) {
            Ok(ticket) => {
                let _ = self.jobs.send(Job::Connect(self.connection.clone(), ticket));
                self.notification = None;
            }
            Err(err) => self.notification = Some(err.to_string()),
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Connect(ticket, outcome) => {
                self.session.complete_connect(ticket, outcome);
            }
            Completion::Query(ticket, outcome) => {
                self.session.complete_query(ticket, outcome);
            }
            Completion::Schema(Ok(schema)) => {
                let tables = schema.len();
                self.session.apply_schema(schema);
                self.notification = Some(format!("schema refreshed ({} tables)", tables));
            }
            // best-effort refresh; never a session error
            Completion::Schema(Err(err)) => {
                self.notification = Some(format!("schema refresh failed: {}", err));
            }
        }
    }

    /// Rebuild table/chart components when the applied result changes, and
    /// drop them when the result is gone. Interactive sub-state never
    /// crosses a result boundary.
    fn sync_components(&mut self) {
        match self.session.result() {
            Some(result) => {
                if self.session.revision() != self.applied_revision {
                    self.applied_revision = self.session.revision();
                    self.result_vm = Some(present_result(result));
                    self.table = TableComponent::from_result(result);
                    self.chart = ChartComponent::from_result(result);
                    self.focus = Focus::Prompt;
                }
            }
            None => {
                self.applied_revision = self.session.revision();
                self.result_vm = None;
                self.table = None;
                self.chart = None;
                self.focus = Focus::Prompt;
            }
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(f.area());

        self.render_status(f, chunks[0]);
        self.prompt.render(
            f,
            chunks[1],
            self.focus == Focus::Prompt,
            self.session.phase() == Phase::Querying,
        );
        self.render_body(f, chunks[2]);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " querydeck ",
            Style::default().add_modifier(Modifier::BOLD),
        )];

        spans.push(Span::raw(format!(
            "{}://{}/{} ",
            self.connection.driver.as_str(),
            self.connection.host,
            self.connection.database
        )));

        let (label, color) = match self.session.phase() {
            Phase::Disconnected => ("disconnected (r to reconnect)", Color::Red),
            Phase::Connecting => ("connecting...", Color::Yellow),
            Phase::Idle => ("connected", Color::Green),
            Phase::Querying => ("query running...", Color::Yellow),
        };
        spans.push(Span::styled(label, Style::default().fg(color)));

        if self.session.backend_down() {
            spans.push(Span::styled(
                "  backend unreachable",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }
        if self.session.upload_pending() {
            spans.push(Span::styled(
                "  upload in progress",
                Style::default().fg(Color::Yellow),
            ));
        }
        if let Some(notification) = &self.notification {
            spans.push(Span::styled(
                format!("  {}", notification),
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect) {
        if let Some(error) = self.session.error() {
            let lines = vec![
                Line::styled(error.to_string(), Style::default().fg(Color::Red)),
                Line::styled(
                    "Press Enter on a new question, or q to quit.",
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ];
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
            return;
        }

        let Some(vm) = self.result_vm.clone() else {
            let help = Paragraph::new(vec![
                Line::raw("Type a question and press Enter."),
                Line::raw(""),
                Line::styled(
                    "Tab focus  /(in table) search  ←/→ page  b/l/p chart type",
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Line::styled(
                    "1-9 replay a suggestion  s refresh schema  x disconnect  q quit",
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ]);
            f.render_widget(help, area);
            return;
        };

        // one constraint per present section, table takes the slack
        let mut constraints = Vec::new();
        for section in &vm.sections {
            constraints.push(match section {
                Section::Answer { .. } => Constraint::Length(3),
                Section::Sql { query } => {
                    Constraint::Length((query.lines().count() as u16).clamp(1, 4) + 1)
                }
                Section::Metrics { .. } => Constraint::Length(2),
                Section::Table(_) => Constraint::Min(7),
                Section::Chart(_) => Constraint::Length(10),
                Section::Panels {
                    insights,
                    suggestions,
                } => Constraint::Length(((insights.len() + suggestions.len()) as u16).clamp(1, 6) + 2),
            });
        }
        let areas = Layout::vertical(constraints).split(area);

        for (section, slot) in vm.sections.iter().zip(areas.iter()) {
            match section {
                Section::Answer { badge, text } => {
                    let color = match badge.level {
                        StatusLevel::Success => Color::Green,
                        StatusLevel::Info => Color::Blue,
                        StatusLevel::Warning => Color::Yellow,
                        StatusLevel::Error => Color::Red,
                    };
                    let line = Line::from(vec![
                        Span::styled(
                            format!("[{}] ", badge.label),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(text.clone()),
                    ]);
                    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), *slot);
                }
                Section::Sql { query } => {
                    let mut lines = vec![Line::styled(
                        "SQL",
                        Style::default().add_modifier(Modifier::DIM),
                    )];
                    lines.extend(
                        query
                            .lines()
                            .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Cyan))),
                    );
                    f.render_widget(Paragraph::new(lines), *slot);
                }
                Section::Metrics { cards, .. } => {
                    let line = cards
                        .iter()
                        .map(|card| format!("{}: {}", card.label, card.value))
                        .collect::<Vec<_>>()
                        .join("  |  ");
                    f.render_widget(
                        Paragraph::new(vec![Line::raw(""), Line::raw(line)]),
                        *slot,
                    );
                }
                Section::Table(_) => {
                    if let Some(table) = self.table.as_mut() {
                        table.render(f, *slot, self.focus == Focus::Table);
                    }
                }
                Section::Chart(_) => {
                    if let Some(chart) = self.chart.as_mut() {
                        chart.render(f, *slot, self.focus == Focus::Chart);
                    }
                }
                Section::Panels {
                    insights,
                    suggestions,
                } => {
                    let mut lines = Vec::new();
                    if !insights.is_empty() {
                        lines.push(Line::styled(
                            "Insights",
                            Style::default().add_modifier(Modifier::DIM),
                        ));
                        lines.extend(insights.iter().map(|i| Line::raw(format!("  - {}", i))));
                    }
                    if !suggestions.is_empty() {
                        lines.push(Line::styled(
                            "Suggestions (press the number to ask)",
                            Style::default().add_modifier(Modifier::DIM),
                        ));
                        lines.extend(
                            suggestions
                                .iter()
                                .enumerate()
                                .map(|(i, s)| Line::raw(format!("  {}. {}", i + 1, s))),
                        );
                    }
                    f.render_widget(Paragraph::new(lines), *slot);
                }
            }
        }
    }
}
