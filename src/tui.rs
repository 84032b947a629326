use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use rand::Rng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::config::Config;
use crate::db::Database;
use crate::matching::{self, MatchColor};
use crate::models::Job;
use crate::state::AppState;

struct BrowseState {
    visible: Vec<i64>,
    selected: usize,
    scroll_offset: u16,
    matches_only: bool,
    reasons: Vec<String>,
}

impl BrowseState {
    fn new(app: &AppState) -> Self {
        Self {
            visible: app.jobs().iter().map(|j| j.id).collect(),
            selected: 0,
            scroll_offset: 0,
            matches_only: false,
            reasons: Vec::new(),
        }
    }

    fn current_id(&self) -> Option<i64> {
        self.visible.get(self.selected).copied()
    }

    fn refresh_visible(&mut self, app: &AppState, threshold: i32) {
        self.visible = if self.matches_only {
            app.top_matches(threshold).iter().map(|j| j.id).collect()
        } else {
            app.jobs().iter().map(|j| j.id).collect()
        };
        self.selected = 0;
        self.scroll_offset = 0;
    }

    fn load_reasons<R: Rng + ?Sized>(&mut self, app: &AppState, rng: &mut R) {
        self.reasons = match self.current_id().and_then(|id| app.job(id)) {
            Some(job) => matching::match_reasons(job, app.user(), rng),
            None => Vec::new(),
        };
    }

    fn next(&mut self) {
        if !self.visible.is_empty() && self.selected < self.visible.len() - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

fn score_color(score: i32) -> Color {
    match matching::match_score_color(score) {
        MatchColor::Green => Color::Rgb(0x2E, 0x8B, 0x57),
        MatchColor::Orange => Color::Rgb(0xFF, 0xA5, 0x00),
        MatchColor::Red => Color::Rgb(0xFF, 0x6B, 0x6B),
    }
}

pub fn run_browse<R: Rng + ?Sized>(
    db: &Database,
    app: &mut AppState,
    config: &Config,
    rng: &mut R,
) -> Result<()> {
    if app.jobs().is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    let mut state = BrowseState::new(app);
    state.load_reasons(app, rng);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, app, db, config, rng);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop<R: Rng + ?Sized>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut BrowseState,
    app: &mut AppState,
    db: &Database,
    config: &Config,
    rng: &mut R,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, state, app, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let prev_selected = state.selected;
            let prev_visible = state.visible.clone();
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Char('s') => {
                    if let Some(id) = state.current_id() {
                        app.toggle_saved_job(id)?;
                        if let Err(e) = crate::save_state(db, app) {
                            tracing::warn!(error = %e, "could not persist saved jobs");
                        }
                    }
                }
                KeyCode::Char('m') => {
                    state.matches_only = !state.matches_only;
                    state.refresh_visible(app, config.min_match_score);
                }
                _ => {}
            }
            if state.selected != prev_selected || state.visible != prev_visible {
                list_state.select(if state.visible.is_empty() { None } else { Some(state.selected) });
                state.load_reasons(app, rng);
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &BrowseState, app: &AppState, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(frame.area());

    // Left panel: job list
    let items: Vec<ListItem> = state
        .visible
        .iter()
        .filter_map(|id| app.job(*id))
        .map(|job| {
            let saved = if app.is_saved(job.id) { "*" } else { " " };
            let title = crate::truncate(&job.title, 30);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} #{:<2} ", saved, job.id)),
                Span::styled(
                    format!("{:>3}%", job.match_score),
                    Style::default().fg(score_color(job.match_score)),
                ),
                Span::raw(format!(" {}", title)),
            ]))
        })
        .collect();

    let title = if state.matches_only {
        format!(" Matches ({}) ", state.visible.len())
    } else {
        format!(" Jobs ({}) ", state.visible.len())
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: job detail
    let job = state.current_id().and_then(|id| app.job(id));
    let detail = build_detail(job, state, app);
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));

    frame.render_widget(detail_widget, chunks[1]);

    // Footer help
    let help_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let help = Paragraph::new(" j/k:navigate  J/K:scroll  s:save  m:matches only  q:quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area[1]);
}

fn build_detail<'a>(job: Option<&'a Job>, state: &'a BrowseState, app: &AppState) -> Text<'a> {
    let Some(job) = job else {
        return Text::raw("No job selected");
    };

    let mut lines: Vec<Line> = Vec::new();

    // Header
    lines.push(Line::from(Span::styled(
        &job.title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("{} · {}", job.author, job.date)));

    let color = score_color(job.match_score);
    lines.push(Line::from(Span::styled(
        format!("{}% match", job.match_score),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));
    if app.is_saved(job.id) {
        lines.push(Line::from(Span::styled("Saved", Style::default().fg(Color::Cyan))));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("Location: {}", job.location)));
    lines.push(Line::from(format!("Time: {}", job.time)));
    lines.push(Line::from(format!("Price: {}", job.price)));
    lines.push(Line::from(format!("Skills: {}", job.skills.join(", "))));
    lines.push(Line::from(""));

    if !state.reasons.is_empty() {
        lines.push(Line::from(Span::styled(
            "Why it matches",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for reason in &state.reasons {
            lines.push(Line::from(format!("  - {}", reason)));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Description",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(job.description.as_str()));

    Text::from(lines)
}
