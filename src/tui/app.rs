//! Main TUI application state machine.
//!
//! Handles:
//! - Condition selection
//! - Input event handling
//! - Prediction requests and session state

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::application::{PredictionService, SessionState};
use crate::domain::PredictionOutcome;
use crate::ports::ArtifactSource;

use super::ui::{
    diabetes::{render_diabetes_form, DiabetesFormState, FormStatus},
    home::render_home,
    placeholder::render_placeholder,
    render_disclaimer, render_sidebar,
};

/// Entries of the condition selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Diabetes,
    HeartDisease,
    Hypertension,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Home,
        Screen::Diabetes,
        Screen::HeartDisease,
        Screen::Hypertension,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease (coming soon)",
            Self::Hypertension => "Hypertension (coming soon)",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state
pub struct App<A: ArtifactSource> {
    screen: Screen,
    should_quit: bool,
    service: PredictionService<A>,
    session: SessionState,
    form: DiabetesFormState,
}

impl<A: ArtifactSource> App<A> {
    #[must_use]
    pub fn new(service: PredictionService<A>) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            service,
            session: SessionState::new(),
            form: DiabetesFormState::default(),
        }
    }

    /// Run the application until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(chunks[0]);

        render_sidebar(f, columns[0], self.screen);

        match self.screen {
            Screen::Home => render_home(f, columns[1], &self.session),
            Screen::Diabetes => render_diabetes_form(f, columns[1], &self.form),
            Screen::HeartDisease | Screen::Hypertension => {
                render_placeholder(f, columns[1], self.screen.title())
            }
        }

        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Left => {
                self.screen = self.screen.prev();
                return;
            }
            KeyCode::Right => {
                self.screen = self.screen.next();
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Diabetes => self.handle_diabetes_key(key),
            Screen::Home | Screen::HeartDisease | Screen::Hypertension => {
                if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.should_quit = true;
                }
            }
        }
    }

    fn handle_diabetes_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Up => {
                self.form.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form.next_field();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form.load_sample_data();
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.form.clear_sensitive();
            }
            KeyCode::Char(c) => {
                self.form.input_char(c);
            }
            KeyCode::Backspace => {
                self.form.delete_char();
            }
            KeyCode::Delete => {
                self.form.clear_field();
            }
            KeyCode::Enter => {
                self.submit_diabetes_form();
            }
            _ => {}
        }
    }

    fn submit_diabetes_form(&mut self) {
        let measurements = match self.form.to_measurements() {
            Ok(m) => m,
            Err(e) => {
                self.form.status = Some(FormStatus::Error(e));
                return;
            }
        };

        if let Err(errors) = measurements.validate() {
            self.form.status = Some(FormStatus::Error(errors.join("; ")));
            return;
        }

        self.form.status = Some(match self.service.predict_measurements(&measurements) {
            Ok(PredictionOutcome::Success(prediction)) => {
                let message = format!("Predicted Outcome: {}", prediction.summary());
                self.session.record(prediction);
                FormStatus::Success(message)
            }
            Ok(PredictionOutcome::Failure(failure)) => FormStatus::Error(failure.to_string()),
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                FormStatus::Error(format!("Prediction failed. {e}"))
            }
        });
    }
}
