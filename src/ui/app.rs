//! Main TUI application state and logic

use crate::parser::token::Token;
use crate::snapshot::{HistoryError, ParseHistory};
use crate::ui::panes::{self, TokenScrollState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tokens,
    Stack,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (tokens -> tree -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// The recorded parse
    pub history: ParseHistory,

    /// The tokens that were parsed
    pub tokens: Vec<Token>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub token_scroll: TokenScrollState,
    pub stack_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,
}

impl App {
    /// Create a new app over a finished parse
    pub fn new(history: ParseHistory, tokens: Vec<Token>) -> Self {
        let status_message = if history.trace().is_truncated() {
            String::from("Trace truncated: snapshot memory limit reached")
        } else {
            String::from("Ready!")
        };

        App {
            history,
            tokens,
            focused_pane: FocusedPane::Tokens,
            token_scroll: TokenScrollState::new(),
            stack_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
            is_playing: false,
            last_play_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(400) {
                if self.history.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether the current step is the recorded failure
    fn at_failure(&self) -> bool {
        matches!(
            self.history.current().map(|s| &s.event),
            Some(crate::snapshot::TraceEvent::Fail(_))
        )
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 3 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        // Right column: Tree (top) | Stack (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let snapshot = self.history.current();
        let position = snapshot.map(|s| s.position).unwrap_or(0);
        let is_error = self.at_failure();

        panes::render_tokens_pane(
            frame,
            columns[0],
            &self.tokens,
            position,
            is_error,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.token_scroll,
        );

        panes::render_tree_pane(
            frame,
            right_rows[0],
            self.history.latest_subtree(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[1],
            snapshot,
            self.history.trace(),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        let message = match self.history.failure() {
            Some(err) if is_error => err.to_string(),
            _ => self.status_message.clone(),
        };
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &message,
            self.history.history_position(),
            self.history.total_snapshots(),
            is_error,
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n)
                    .take_while(|_| self.history.step_forward().is_ok())
                    .count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                let result = self.history.step_backward();
                self.report_step("backward", result);
            }
            KeyCode::Right => {
                self.is_playing = false;
                let result = self.history.step_forward();
                self.report_step("forward", result);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tokens => {
                    // Scrolling up makes the cursor row move down visually
                    if let Some(row) = self.token_scroll.target_row {
                        self.token_scroll.target_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tokens => {
                    if let Some(row) = self.token_scroll.target_row {
                        self.token_scroll.target_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                self.is_playing = !self.is_playing;
                if self.is_playing {
                    self.last_play_time = Instant::now();
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn report_step(&mut self, direction: &str, result: Result<(), HistoryError>) {
        self.status_message = match result {
            Ok(()) => format!("Stepped {}", direction),
            Err(e) => format!("Cannot step {}: {}", direction, e),
        };
    }
}
