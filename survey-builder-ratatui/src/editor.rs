//! Terminal event loop driving the survey form.

use std::io::{self, Stdout};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use survey_builder::{IdSource, SurveyDocumentStore, SurveyError, SurveyExporter, SurveySnapshot};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{Theme, draw::draw_form, form::FormState};

/// Error type for the survey editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The form sent an edit the document could not apply.
    #[error("Editor bug: {0}")]
    Survey(#[from] SurveyError),
}

/// Full-screen terminal editor for composing surveys.
#[derive(Debug, Clone)]
pub struct SurveyEditor {
    /// Heading shown at the top of the form.
    heading: String,
    /// Color theme for the UI.
    theme: Theme,
}

impl Default for SurveyEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyEditor {
    /// Create a new editor with default settings.
    pub fn new() -> Self {
        Self {
            heading: "Advanced Survey Form".to_string(),
            theme: Theme::default(),
        }
    }

    /// Set the heading shown at the top of the form.
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the editor until the user quits.
    ///
    /// Every submitted survey is handed to `exporter`. Returns the surveys
    /// submitted during the session, oldest first.
    pub fn run<I: IdSource, E: SurveyExporter>(
        &self,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) -> Result<Vec<SurveySnapshot>, EditorError> {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, store, exporter);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop<I: IdSource, E: SurveyExporter>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        store: &mut SurveyDocumentStore<I>,
        exporter: &mut E,
    ) -> Result<Vec<SurveySnapshot>, EditorError> {
        let mut state = FormState::new();
        let mut scroll = 0;
        info!("editor started");

        while !state.should_quit() {
            terminal.draw(|frame| {
                draw_form(
                    frame,
                    &state,
                    store.document(),
                    &self.theme,
                    &self.heading,
                    &mut scroll,
                )
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                debug!(?key, "key pressed");
                if let Err(err) = state.handle_key(key, store, exporter) {
                    error!(error = %err, "form sent an invalid edit");
                    return Err(err.into());
                }
            }
        }

        info!(submitted = state.submitted().len(), "editor closed");
        Ok(state.into_submitted())
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, EditorError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), EditorError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
