//! Step-by-step response wizard for survey participants.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};
use survey_form::{AnswerType, LikertValue, ResponseSession, ResponseValue};

use crate::terminal::{LineInput, restore_terminal, setup_terminal};
use crate::{RatatuiError, Theme};

/// How the participant left the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Every question is answered; the caller should submit.
    Submit,
    Cancel,
}

/// Ratatui front-end for [`ResponseSession`].
#[derive(Debug, Clone)]
pub struct RatatuiWizard {
    theme: Theme,
    notice: Option<String>,
}

impl Default for RatatuiWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiWizard {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            notice: None,
        }
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Message shown on start, e.g. why the last submission failed.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Walk the participant through the survey.
    pub fn run(&self, session: &mut ResponseSession) -> Result<WizardOutcome, RatatuiError> {
        let mut terminal = setup_terminal()?;
        let mut screen = WizardScreen::new(self.theme.clone(), session);
        screen.error = self.notice.clone();

        let outcome = loop {
            if let Err(err) = terminal.draw(|frame| screen.draw(frame, session)) {
                restore_terminal(&mut terminal)?;
                return Err(err.into());
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(outcome) = screen.handle_key(session, key) {
                    break outcome;
                }
            }
        };

        restore_terminal(&mut terminal)?;
        Ok(outcome)
    }
}

/// Screen state of the wizard.
#[derive(Debug, Clone)]
pub struct WizardScreen {
    theme: Theme,
    text: LineInput,
    error: Option<String>,
}

impl WizardScreen {
    pub fn new(theme: Theme, session: &ResponseSession) -> Self {
        let mut screen = Self {
            theme,
            text: LineInput::default(),
            error: None,
        };
        screen.load_text(session);
        screen
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply one key press. Returns an outcome when the wizard should close.
    pub fn handle_key(
        &mut self,
        session: &mut ResponseSession,
        key: KeyEvent,
    ) -> Option<WizardOutcome> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(WizardOutcome::Cancel);
        }

        match key.code {
            KeyCode::Esc => return Some(WizardOutcome::Cancel),
            KeyCode::Enter | KeyCode::Right => {
                if session.is_last() {
                    match session.build_submission() {
                        Ok(_) => return Some(WizardOutcome::Submit),
                        Err(err) => self.error = Some(err.to_string()),
                    }
                } else {
                    self.error = None;
                    session.next();
                    self.load_text(session);
                }
            }
            KeyCode::Left => {
                self.error = None;
                session.back();
                self.load_text(session);
            }
            KeyCode::Tab => {
                self.error = None;
                session.skip();
                self.load_text(session);
            }
            code => match session.current().answer_type() {
                AnswerType::Likert => self.likert_key(session, code),
                AnswerType::FreeText => self.text_key(session, code),
            },
        }
        None
    }

    fn likert_key(&mut self, session: &mut ResponseSession, code: KeyCode) {
        if let KeyCode::Char(c) = code
            && let Some(value) = c.to_digit(10)
        {
            match session.answer_likert(value as u8) {
                Ok(()) => self.error = None,
                Err(err) => self.error = Some(err.to_string()),
            }
        }
    }

    fn text_key(&mut self, session: &mut ResponseSession, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.text.push(c),
            KeyCode::Backspace => self.text.backspace(),
            _ => return,
        }
        match session.answer_text(self.text.value.clone()) {
            Ok(()) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    /// Load the stored answer of the current question into the text buffer.
    fn load_text(&mut self, session: &ResponseSession) {
        let text = session
            .current_answer()
            .and_then(ResponseValue::as_text)
            .unwrap_or_default();
        self.text = LineInput::new(text);
    }

    /// Render the current question.
    pub fn draw(&self, frame: &mut Frame, session: &ResponseSession) {
        let area = frame.area();
        let theme = &self.theme;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Progress
                Constraint::Length(4), // Question
                Constraint::Min(7),    // Answer
                Constraint::Length(1), // Error
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let title = Paragraph::new(session.survey().name.as_str())
            .style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(theme.border)),
            );
        frame.render_widget(title, chunks[0]);

        let progress = Gauge::default()
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.border)))
            .gauge_style(Style::default().fg(theme.primary))
            .ratio(session.progress().clamp(0.0, 1.0))
            .label(format!(
                "Question {} of {}",
                session.position() + 1,
                session.len()
            ));
        frame.render_widget(progress, chunks[1]);

        let question = Paragraph::new(session.current().text())
            .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true });
        frame.render_widget(question, chunks[2]);

        match session.current().answer_type() {
            AnswerType::Likert => self.draw_likert(frame, session, chunks[3]),
            AnswerType::FreeText => self.draw_text(frame, chunks[3]),
        }

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(theme.error)),
                chunks[4],
            );
        }

        let next = if session.is_last() { "Submit" } else { "Next" };
        let help_text = match session.current().answer_type() {
            AnswerType::Likert => format!("1-5: Answer  Enter/→: {next}  ←: Back  Tab: Skip  Esc: Cancel"),
            AnswerType::FreeText => format!("Type to answer  Enter/→: {next}  ←: Back  Tab: Skip  Esc: Cancel"),
        };
        frame.render_widget(
            Paragraph::new(help_text).style(Style::default().fg(theme.border)),
            chunks[5],
        );
    }

    fn draw_likert(&self, frame: &mut Frame, session: &ResponseSession, area: Rect) {
        let theme = &self.theme;
        let chosen = session.current_answer().and_then(ResponseValue::as_likert);
        let lines: Vec<Line> = LikertValue::all()
            .map(|value| {
                let selected = chosen == Some(value);
                let style = if selected {
                    Style::default()
                        .fg(theme.highlight)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                let mark = if selected { "(•)" } else { "( )" };
                Line::from(vec![Span::styled(format!(" {mark} {value} "), style)])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_text(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let input = Paragraph::new(format!("{}▏", self.text.value))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Your answer ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            );
        frame.render_widget(input, area);
    }
}
