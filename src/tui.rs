//! TUI (Terminal User Interface) module for the word quiz
//!
//! Full-screen front end over the same `SessionInterface` the prompt loop
//! uses, rendered with Ratatui.
//!
//! # State Machine
//! - `EnteringRoundCount` → `ChoosingOption` → `ShowingResult` → back to
//!   `ChoosingOption` for the next round
//! - Terminal state: `Finished` (summary shown, any key leaves)

use crate::generator::Question;
use crate::session::{ChoiceInput, DEFAULT_ROUNDS, SessionInterface, SessionSummary};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const MAX_ROUND_COUNT_DIGITS: usize = 4;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

#[derive(Debug)]
enum TuiState {
    EnteringRoundCount,
    ChoosingOption,
    ShowingResult,
    Finished,
}

/// Presentation copy of the current round; the driver owns the Question.
struct QuestionView {
    round: u32,
    total: u32,
    masked: String,
    options: Vec<String>,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    state: &'a TuiState,
    round_count_input: &'a str,
    question: Option<&'a QuestionView>,
    selected: usize,
    score: u32,
    message: &'a str,
    error_message: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and quiz state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    round_count_input: String,
    question: Option<QuestionView>,
    selected: usize,
    score: u32,
    message: String,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            state: TuiState::EnteringRoundCount,
            round_count_input: String::new(),
            question: None,
            selected: 0,
            score: 0,
            message: String::new(),
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: &self.state,
            round_count_input: &self.round_count_input,
            question: self.question.as_ref(),
            selected: self.selected,
            score: self.score,
            message: &self.message,
            error_message: &self.error_message,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Block until the next real key press, dropping mouse/focus/paste noise
    /// and the garbage characters terminals emit around focus changes.
    fn next_key_press(&mut self) -> Result<KeyEvent, io::Error> {
        loop {
            if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => self.draw_or_log(),
                Event::Key(key) => {
                    if key.kind != event::KeyEventKind::Press {
                        continue;
                    }
                    if let KeyCode::Char(c) = key.code
                        && (c == '\u{FFFD}'
                            || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD
                                && c != '\t'
                                && c != '\n'
                                && c != '\r')
                    {
                        debug_log!("next_key_press() - Dropping escape-sequence garbage: {:?}", c);
                        continue;
                    }
                    return Ok(key);
                }
                _ => {}
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Masked word
                Constraint::Min(8),    // Options / prompt panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_word(f, chunks[1], ctx.question);
        Self::render_panel(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("MISSING LETTERS WORD QUIZ")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_word(f: &mut Frame, area: Rect, question: Option<&QuestionView>) {
        let block = Block::default().title("Word").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(view) = question else {
            return;
        };

        let mut spans = vec![Span::raw("  ")];
        for letter in view.masked.chars() {
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }

        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            },
        );
    }

    fn render_panel(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        match ctx.state {
            TuiState::EnteringRoundCount => {
                lines.push(Line::from(vec![Span::styled(
                    format!(
                        "How many rounds? [{DEFAULT_ROUNDS}]: {}",
                        ctx.round_count_input
                    ),
                    INFO_STYLE,
                )]));
            }
            _ => {
                if let Some(view) = ctx.question {
                    for (i, option) in view.options.iter().enumerate() {
                        let text = format!("  {}) {option}  ", i + 1);
                        let style = if i == ctx.selected {
                            SELECTED_STYLE
                        } else {
                            Style::default()
                        };
                        lines.push(Line::from(vec![Span::styled(text, style)]));
                    }
                    lines.push(Line::from(""));
                }
            }
        }

        if !ctx.message.is_empty() {
            let style = if matches!(ctx.state, TuiState::ShowingResult | TuiState::Finished) {
                SUCCESS_STYLE
            } else {
                INFO_STYLE
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Options").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let status = match ctx.question {
            Some(view) => format!(
                "Round {}/{} | Score: {}",
                view.round, view.total, ctx.score
            ),
            None => "Ready to start".to_string(),
        };
        let paragraph = Paragraph::new(status)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::EnteringRoundCount => {
                "Type a round count | ENTER: Start (blank = default) | ESC: Quit"
            }
            TuiState::ChoosingOption => {
                "1-9: Pick option | UP/DOWN + ENTER: Pick highlighted | Q/ESC: Quit"
            }
            TuiState::ShowingResult => "Press any key to continue",
            TuiState::Finished => "Press any key to exit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}

impl SessionInterface for TuiInterface {
    fn read_round_count(&mut self) -> Option<u32> {
        self.state = TuiState::EnteringRoundCount;
        self.round_count_input.clear();

        loop {
            self.draw_or_log();
            let key = match self.next_key_press() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_round_count() - Input error, quitting: {}", e);
                    return None;
                }
            };

            match key.code {
                KeyCode::Char(c)
                    if c.is_ascii_digit()
                        && !Self::has_modifier_keys(&key)
                        && self.round_count_input.len() < MAX_ROUND_COUNT_DIGITS =>
                {
                    self.round_count_input.push(c);
                }
                KeyCode::Backspace => {
                    self.round_count_input.pop();
                }
                KeyCode::Enter => {
                    let rounds = if self.round_count_input.is_empty() {
                        DEFAULT_ROUNDS
                    } else {
                        // Digits only, at most four of them: parse cannot fail.
                        self.round_count_input.parse::<u32>().unwrap_or(DEFAULT_ROUNDS)
                    };
                    info_log!("read_round_count() - Starting {} rounds", rounds.max(1));
                    return Some(rounds.max(1));
                }
                KeyCode::Esc => {
                    info_log!("read_round_count() - ESC pressed before first round");
                    return None;
                }
                _ => {}
            }
        }
    }

    fn present_question(&mut self, round: u32, total: u32, question: &Question) {
        debug_log!("present_question() - Round {}/{}", round, total);
        self.question = Some(QuestionView {
            round,
            total,
            masked: question.masked.clone(),
            options: question.options.clone(),
        });
        self.selected = 0;
        self.message.clear();
        self.error_message.clear();
        self.state = TuiState::ChoosingOption;
        self.draw_or_log();
    }

    fn read_choice(&mut self, option_count: usize) -> ChoiceInput {
        loop {
            self.draw_or_log();
            let key = match self.next_key_press() {
                Ok(key) => key,
                Err(e) => {
                    debug_log!("read_choice() - Input error, quitting: {}", e);
                    return ChoiceInput::Quit;
                }
            };

            match key.code {
                KeyCode::Up => {
                    self.selected = self.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.selected + 1 < option_count {
                        self.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    return ChoiceInput::Choice(self.selected);
                }
                KeyCode::Char(c) if c.is_ascii_digit() && !Self::has_modifier_keys(&key) => {
                    let n = c.to_digit(10).unwrap_or(0) as usize;
                    if (1..=option_count).contains(&n) {
                        return ChoiceInput::Choice(n - 1);
                    }
                    self.error_message = format!("Pick an option between 1 and {option_count}");
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    info_log!("read_choice() - Quit requested");
                    return ChoiceInput::Quit;
                }
                _ => {}
            }
        }
    }

    fn display_result(&mut self, correct: bool, answer: &str) {
        if correct {
            self.score += 1;
            self.message = "Correct! +1 point".to_string();
        } else {
            self.message = format!("Wrong. Correct answer was '{answer}'.");
        }
        self.state = TuiState::ShowingResult;
        self.draw_or_log();

        // Hold the result on screen until the player acknowledges it.
        if let Err(e) = self.next_key_press() {
            debug_log!("display_result() - Input error while waiting: {}", e);
        }
    }

    fn display_summary(&mut self, summary: &SessionSummary) {
        self.message = format!(
            "Your final score: {}/{}",
            summary.score, summary.rounds_played
        );
        self.state = TuiState::Finished;
        self.draw_or_log();

        if let Err(e) = self.next_key_press() {
            debug_log!("display_summary() - Input error while waiting: {}", e);
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            debug_log!("Drop cleanup error: {}", e);
        }
    }
}
