//! Full-screen survey editor.
//!
//! Shows the draft's details and the numbered question list. Questions and
//! participants are edited in modals that render on top of the list and take
//! all input while open.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use survey_form::{AnswerType, DraftEditor, EditorOrigin};

use crate::terminal::{LineInput, centered, restore_terminal, setup_terminal};
use crate::{RatatuiError, Theme};

/// How the author left the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    /// Persist the draft.
    Save,
    /// Leave without saving.
    Quit,
}

/// Ratatui front-end for [`DraftEditor`].
#[derive(Debug, Clone)]
pub struct RatatuiEditor {
    theme: Theme,
    notice: Option<String>,
}

impl Default for RatatuiEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiEditor {
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

    /// Message shown in the status line on start, e.g. why the last save failed.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Run the editor until the author saves or quits.
    ///
    /// Saving is left to the caller so that the request can run outside the
    /// terminal session.
    pub fn run(&self, editor: &mut DraftEditor) -> Result<EditorOutcome, RatatuiError> {
        let mut terminal = setup_terminal()?;
        let mut screen = EditorScreen::new(self.theme.clone());
        screen.status = self.notice.clone().map(Status::Error);

        let outcome = loop {
            if let Err(err) = terminal.draw(|frame| screen.draw(frame, editor)) {
                restore_terminal(&mut terminal)?;
                return Err(err.into());
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(outcome) = screen.handle_key(editor, key) {
                    break outcome;
                }
            }
        };

        restore_terminal(&mut terminal)?;
        Ok(outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

/// Which single-line field of the draft is being typed into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Name(LineInput),
    Expiry(LineInput),
}

impl Field {
    fn input_mut(&mut self) -> &mut LineInput {
        match self {
            Field::Name(input) | Field::Expiry(input) => input,
        }
    }
}

/// Screen state of the editor, separate from the draft itself.
#[derive(Debug, Clone)]
pub struct EditorScreen {
    theme: Theme,
    selected: usize,
    field: Option<Field>,
    question_input: LineInput,
    participant_input: LineInput,
    participant_selected: usize,
    status: Option<Status>,
}

impl EditorScreen {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            selected: 0,
            field: None,
            question_input: LineInput::default(),
            participant_input: LineInput::default(),
            participant_selected: 0,
            status: None,
        }
    }

    /// Index of the highlighted question.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Current status line text, if any.
    pub fn status(&self) -> Option<&str> {
        match &self.status {
            Some(Status::Info(message) | Status::Error(message)) => Some(message),
            None => None,
        }
    }

    /// Apply one key press. Returns an outcome when the editor should close.
    pub fn handle_key(&mut self, editor: &mut DraftEditor, key: KeyEvent) -> Option<EditorOutcome> {
        if editor.is_question_modal_open() {
            self.question_modal_key(editor, key);
            return None;
        }
        if editor.participants_modal().is_some() {
            self.participants_modal_key(editor, key);
            return None;
        }
        if self.field.is_some() {
            self.field_key(editor, key);
            return None;
        }
        self.list_key(editor, key)
    }

    fn list_key(&mut self, editor: &mut DraftEditor, key: KeyEvent) -> Option<EditorOutcome> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Some(EditorOutcome::Save),
                KeyCode::Char('c') => Some(EditorOutcome::Quit),
                _ => None,
            };
        }

        self.status = None;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < editor.questions().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('a') => {
                editor.open_question_modal();
                self.question_input = LineInput::default();
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if editor.edit_question(self.selected).is_ok() {
                    let text = editor
                        .question_modal()
                        .map(|modal| modal.form.text.clone())
                        .unwrap_or_default();
                    self.question_input = LineInput::new(text);
                }
            }
            KeyCode::Char('d') => {
                if let Ok(removed) = editor.delete_question(self.selected) {
                    self.status = Some(Status::Info(format!("Deleted \"{}\"", removed.text())));
                    self.clamp_selection(editor);
                }
            }
            KeyCode::Char('c') => {
                if editor.duplicate_question(self.selected).is_ok() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') => match editor.dragged_index() {
                Some(_) => {
                    editor.complete_drag(self.selected);
                }
                None if self.selected < editor.questions().len() => {
                    editor.begin_drag(self.selected);
                }
                None => {}
            },
            KeyCode::Char('p') => {
                editor.open_participants_modal();
                self.participant_input = LineInput::default();
                self.participant_selected = 0;
            }
            KeyCode::Char('n') => {
                self.field = Some(Field::Name(LineInput::new(editor.name())));
            }
            KeyCode::Char('x') => {
                let current = editor
                    .expire_date()
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                self.field = Some(Field::Expiry(LineInput::new(current)));
            }
            KeyCode::Esc if editor.dragged_index().is_some() => {
                editor.end_drag();
            }
            KeyCode::Esc | KeyCode::Char('q') => return Some(EditorOutcome::Quit),
            _ => {}
        }
        None
    }

    fn field_key(&mut self, editor: &mut DraftEditor, key: KeyEvent) {
        let Some(field) = self.field.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => field.input_mut().push(c),
            KeyCode::Backspace => field.input_mut().backspace(),
            KeyCode::Esc => self.field = None,
            KeyCode::Enter => {
                let result = match field {
                    Field::Name(input) => {
                        editor.set_name(input.value.trim());
                        Ok(())
                    }
                    Field::Expiry(input) => editor.set_expire_date(&input.value),
                };
                match result {
                    Ok(()) => self.field = None,
                    Err(err) => self.status = Some(Status::Error(err.to_string())),
                }
            }
            _ => {}
        }
    }

    fn question_modal_key(&mut self, editor: &mut DraftEditor, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                editor.close_question_modal();
                self.status = None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if let Err(err) = editor.toggle_form_answer_type() {
                    self.status = Some(Status::Error(err.to_string()));
                }
            }
            KeyCode::Enter => {
                let adding = editor.editing_index().is_none();
                match editor.save_question() {
                    Ok(()) => {
                        self.status = None;
                        if adding {
                            self.selected = editor.questions().len().saturating_sub(1);
                        }
                    }
                    Err(err) => self.status = Some(Status::Error(err.to_string())),
                }
            }
            KeyCode::Char(c) => {
                self.question_input.push(c);
                self.sync_form_text(editor);
            }
            KeyCode::Backspace => {
                self.question_input.backspace();
                self.sync_form_text(editor);
            }
            _ => {}
        }
    }

    fn sync_form_text(&mut self, editor: &mut DraftEditor) {
        if let Err(err) = editor.set_form_text(self.question_input.value.clone()) {
            self.status = Some(Status::Error(err.to_string()));
        }
    }

    fn participants_modal_key(&mut self, editor: &mut DraftEditor, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            if editor.save_participants().is_ok() {
                self.status = Some(Status::Info(format!(
                    "{} participant(s)",
                    editor.participants().len()
                )));
            }
            return;
        }
        let Some(modal) = editor.participants_modal_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                editor.close_participants_modal();
                self.status = None;
            }
            KeyCode::Enter => {
                modal.input = self.participant_input.value.clone();
                match modal.add_input() {
                    Ok(_) => {
                        self.participant_input = LineInput::default();
                        self.status = None;
                    }
                    Err(err) => self.status = Some(Status::Error(err.to_string())),
                }
            }
            KeyCode::Up => {
                self.participant_selected = self.participant_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.participant_selected + 1 < modal.participants().len() {
                    self.participant_selected += 1;
                }
            }
            KeyCode::Delete => {
                modal.remove(self.participant_selected);
                let len = modal.participants().len();
                self.participant_selected = self.participant_selected.min(len.saturating_sub(1));
            }
            KeyCode::Char(c) => self.participant_input.push(c),
            KeyCode::Backspace => self.participant_input.backspace(),
            _ => {}
        }
    }

    fn clamp_selection(&mut self, editor: &DraftEditor) {
        self.selected = self
            .selected
            .min(editor.questions().len().saturating_sub(1));
    }

    /// Render the editor and any open modal.
    pub fn draw(&self, frame: &mut Frame, editor: &DraftEditor) {
        let area = frame.area();
        let theme = &self.theme;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(4), // Details
                Constraint::Min(5),    // Questions
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let title = match editor.origin() {
            EditorOrigin::New => "New survey".to_string(),
            EditorOrigin::Existing(id) => format!("Edit survey {id}"),
        };
        let title = Paragraph::new(title)
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

        self.draw_details(frame, editor, chunks[1]);
        self.draw_questions(frame, editor, chunks[2]);

        if let Some(status) = &self.status {
            let (text, color) = match status {
                Status::Info(message) => (message.as_str(), theme.success),
                Status::Error(message) => (message.as_str(), theme.error),
            };
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(color)),
                chunks[3],
            );
        }

        let help_text = if editor.dragged_index().is_some() {
            "↑/↓: Choose position  Space: Drop  Esc: Cancel move"
        } else {
            "a: Add  e: Edit  d: Delete  c: Copy  Space: Move  p: Participants  n: Name  x: Expiry  Ctrl+S: Save  q: Quit"
        };
        frame.render_widget(
            Paragraph::new(help_text).style(Style::default().fg(theme.border)),
            chunks[4],
        );

        if let Some(modal) = editor.question_modal() {
            self.draw_question_modal(frame, modal, area);
        } else if editor.participants_modal().is_some() {
            self.draw_participants_modal(frame, editor, area);
        }
    }

    fn draw_details(&self, frame: &mut Frame, editor: &DraftEditor, area: Rect) {
        let theme = &self.theme;
        let label = Style::default().fg(theme.secondary);
        let editing_name = matches!(self.field, Some(Field::Name(_)));
        let editing_expiry = matches!(self.field, Some(Field::Expiry(_)));

        let name = match &self.field {
            Some(Field::Name(input)) => format!("{}▏", input.value),
            _ if editor.name().is_empty() => "(unnamed)".to_string(),
            _ => editor.name().to_string(),
        };
        let expiry = match &self.field {
            Some(Field::Expiry(input)) => format!("{}▏", input.value),
            _ => editor
                .expire_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "none".to_string()),
        };
        let value_style = |active: bool| {
            if active {
                Style::default().fg(theme.highlight)
            } else {
                Style::default().fg(theme.text)
            }
        };

        let lines = vec![
            Line::from(vec![
                Span::styled("Name:         ", label),
                Span::styled(name, value_style(editing_name)),
            ]),
            Line::from(vec![
                Span::styled("Expires:      ", label),
                Span::styled(
                    expiry,
                    value_style(editing_expiry),
                ),
            ]),
            Line::from(vec![
                Span::styled("Participants: ", label),
                Span::styled(
                    editor.participants().len().to_string(),
                    Style::default().fg(theme.text),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_questions(&self, frame: &mut Frame, editor: &DraftEditor, area: Rect) {
        let theme = &self.theme;
        let block = Block::default()
            .title(format!(" Questions ({}) ", editor.questions().len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));

        if editor.questions().is_empty() {
            let empty = Paragraph::new("No questions yet. Press 'a' to add one.")
                .style(Style::default().fg(theme.border))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let dragged = editor.dragged_index();
        let items: Vec<ListItem> = editor
            .questions()
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let marker = if dragged == Some(i) { "↕ " } else { "  " };
                let badge_color = match question.answer_type() {
                    AnswerType::Likert => theme.primary,
                    AnswerType::FreeText => theme.success,
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.highlight)),
                    Span::raw(format!("{}. {}  ", i + 1, question.text())),
                    Span::styled(
                        format!("[{}]", question.answer_type().label()),
                        Style::default().fg(badge_color),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_question_modal(&self, frame: &mut Frame, modal: &survey_form::QuestionModal, area: Rect) {
        let theme = &self.theme;
        let rect = centered(area, 60, 8);
        frame.render_widget(Clear, rect);

        let type_line = Line::from(
            [AnswerType::Likert, AnswerType::FreeText]
                .into_iter()
                .flat_map(|answer_type| {
                    let chosen = modal.form.answer_type == answer_type;
                    let style = if chosen {
                        Style::default()
                            .fg(theme.primary)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.border)
                    };
                    let mark = if chosen { "(•) " } else { "( ) " };
                    [
                        Span::styled(format!("{mark}{}", answer_type.label()), style),
                        Span::raw("   "),
                    ]
                })
                .collect::<Vec<_>>(),
        );
        let save_style = if modal.form.is_submittable() {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.border)
        };
        let lines = vec![
            Line::from(Span::styled("Question", Style::default().fg(theme.secondary))),
            Line::from(format!("{}▏", self.question_input.value)),
            Line::raw(""),
            type_line,
            Line::from(vec![
                Span::styled("Enter: Save", save_style),
                Span::styled("  Tab: Answer type  Esc: Cancel", Style::default().fg(theme.border)),
            ]),
        ];
        let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(format!(" {} ", modal.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );
        frame.render_widget(body, rect);
    }

    fn draw_participants_modal(&self, frame: &mut Frame, editor: &DraftEditor, area: Rect) {
        let Some(modal) = editor.participants_modal() else {
            return;
        };
        let theme = &self.theme;
        let rect = centered(area, 60, 16);
        frame.render_widget(Clear, rect);

        let block = Block::default()
            .title(" Participants ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Input
                Constraint::Min(1),    // List
                Constraint::Length(1), // Help
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Email: ", Style::default().fg(theme.secondary)),
                Span::raw(format!("{}▏", self.participant_input.value)),
            ])),
            chunks[0],
        );

        let items: Vec<ListItem> = modal
            .participants()
            .iter()
            .map(|email| ListItem::new(email.as_str().to_string()))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.selected_bg));
        let mut state = ListState::default().with_selected(
            (!modal.participants().is_empty()).then_some(self.participant_selected),
        );
        frame.render_stateful_widget(list, chunks[1], &mut state);

        frame.render_widget(
            Paragraph::new("Enter: Add  Del: Remove  Ctrl+S: Save  Esc: Discard")
                .style(Style::default().fg(theme.border)),
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use survey_form::Question;

    fn press(screen: &mut EditorScreen, editor: &mut DraftEditor, code: KeyCode) -> Option<EditorOutcome> {
        screen.handle_key(editor, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(screen: &mut EditorScreen, editor: &mut DraftEditor, c: char) -> Option<EditorOutcome> {
        screen.handle_key(editor, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(screen: &mut EditorScreen, editor: &mut DraftEditor, text: &str) {
        for c in text.chars() {
            press(screen, editor, KeyCode::Char(c));
        }
    }

    fn texts(editor: &DraftEditor) -> Vec<&str> {
        editor.questions().iter().map(Question::text).collect()
    }

    fn add_question(screen: &mut EditorScreen, editor: &mut DraftEditor, text: &str, free_text: bool) {
        press(screen, editor, KeyCode::Char('a'));
        type_text(screen, editor, text);
        if free_text {
            press(screen, editor, KeyCode::Tab);
        }
        press(screen, editor, KeyCode::Enter);
    }

    fn select(screen: &mut EditorScreen, editor: &mut DraftEditor, index: usize) {
        while screen.selected() > index {
            press(screen, editor, KeyCode::Up);
        }
        while screen.selected() < index {
            press(screen, editor, KeyCode::Down);
        }
    }

    #[test]
    fn deleting_during_drag_cancels_it() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        for text in ["a", "b", "c", "d"] {
            add_question(&mut screen, &mut editor, text, false);
        }

        select(&mut screen, &mut editor, 1);
        press(&mut screen, &mut editor, KeyCode::Char(' '));
        assert_eq!(editor.dragged_index(), Some(1));
        press(&mut screen, &mut editor, KeyCode::Char('d'));
        assert_eq!(editor.dragged_index(), None);

        // Space now picks up instead of dropping a stale source
        select(&mut screen, &mut editor, 0);
        press(&mut screen, &mut editor, KeyCode::Char(' '));
        assert_eq!(texts(&editor), ["a", "c", "d"]);
        assert_eq!(editor.dragged_index(), Some(0));
    }

    #[test]
    fn copying_during_drag_cancels_it() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        for text in ["a", "b", "c"] {
            add_question(&mut screen, &mut editor, text, false);
        }

        select(&mut screen, &mut editor, 2);
        press(&mut screen, &mut editor, KeyCode::Char(' '));
        select(&mut screen, &mut editor, 0);
        press(&mut screen, &mut editor, KeyCode::Char('c'));
        assert_eq!(editor.dragged_index(), None);
        assert_eq!(texts(&editor), ["a", "a", "b", "c"]);
    }

    #[test]
    fn form_edits_without_open_modal_are_reported() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());

        screen.question_modal_key(&mut editor, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        assert!(screen.status().is_some());

        screen.status = None;
        screen.question_modal_key(&mut editor, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(screen.status().is_some());
        assert!(editor.questions().is_empty());
    }

    #[test]
    fn add_questions_and_drag_to_top() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());

        add_question(&mut screen, &mut editor, "How satisfied?", false);
        add_question(&mut screen, &mut editor, "Comments?", true);
        assert_eq!(texts(&editor), ["How satisfied?", "Comments?"]);
        assert_eq!(
            editor.questions().get(1).unwrap().answer_type(),
            AnswerType::FreeText
        );
        assert_eq!(screen.selected(), 1);

        press(&mut screen, &mut editor, KeyCode::Char(' '));
        press(&mut screen, &mut editor, KeyCode::Up);
        press(&mut screen, &mut editor, KeyCode::Char(' '));
        assert_eq!(texts(&editor), ["Comments?", "How satisfied?"]);
        assert_eq!(editor.dragged_index(), None);
    }

    #[test]
    fn blank_question_keeps_modal_open() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        press(&mut screen, &mut editor, KeyCode::Char('a'));
        type_text(&mut screen, &mut editor, "  ");
        press(&mut screen, &mut editor, KeyCode::Enter);

        assert!(editor.is_question_modal_open());
        assert!(screen.status().is_some());

        // 'q' is text while the modal is open
        assert_eq!(press(&mut screen, &mut editor, KeyCode::Char('q')), None);
        press(&mut screen, &mut editor, KeyCode::Esc);
        assert!(!editor.is_question_modal_open());
        assert!(editor.questions().is_empty());
    }

    #[test]
    fn edit_prefills_and_replaces() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        add_question(&mut screen, &mut editor, "Old", false);

        press(&mut screen, &mut editor, KeyCode::Char('e'));
        assert_eq!(editor.question_modal().unwrap().form.text, "Old");
        press(&mut screen, &mut editor, KeyCode::Backspace);
        press(&mut screen, &mut editor, KeyCode::Backspace);
        press(&mut screen, &mut editor, KeyCode::Backspace);
        type_text(&mut screen, &mut editor, "New");
        press(&mut screen, &mut editor, KeyCode::Enter);

        assert_eq!(texts(&editor), ["New"]);
    }

    #[test]
    fn copy_and_delete() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        add_question(&mut screen, &mut editor, "Only", false);

        press(&mut screen, &mut editor, KeyCode::Char('c'));
        assert_eq!(texts(&editor), ["Only", "Only"]);
        assert_eq!(screen.selected(), 1);

        press(&mut screen, &mut editor, KeyCode::Char('d'));
        press(&mut screen, &mut editor, KeyCode::Char('d'));
        assert!(editor.questions().is_empty());
        assert_eq!(screen.selected(), 0);

        // Nothing to delete
        press(&mut screen, &mut editor, KeyCode::Char('d'));
        assert!(editor.questions().is_empty());
    }

    #[test]
    fn escape_cancels_drag_before_quitting() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        add_question(&mut screen, &mut editor, "A", false);

        press(&mut screen, &mut editor, KeyCode::Char(' '));
        assert_eq!(press(&mut screen, &mut editor, KeyCode::Esc), None);
        assert_eq!(editor.dragged_index(), None);
        assert_eq!(
            press(&mut screen, &mut editor, KeyCode::Esc),
            Some(EditorOutcome::Quit)
        );
    }

    #[test]
    fn participants_modal_flow() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());

        press(&mut screen, &mut editor, KeyCode::Char('p'));
        type_text(&mut screen, &mut editor, "x@y.com");
        press(&mut screen, &mut editor, KeyCode::Enter);
        type_text(&mut screen, &mut editor, "x@y.com");
        press(&mut screen, &mut editor, KeyCode::Enter);
        assert!(screen.status().unwrap().contains("x@y.com"));

        ctrl(&mut screen, &mut editor, 's');
        assert!(editor.participants_modal().is_none());
        let emails: Vec<_> = editor.participants().iter().map(|e| e.as_str()).collect();
        assert_eq!(emails, ["x@y.com"]);

        // Discarded edits leave the list alone
        press(&mut screen, &mut editor, KeyCode::Char('p'));
        press(&mut screen, &mut editor, KeyCode::Delete);
        press(&mut screen, &mut editor, KeyCode::Esc);
        assert_eq!(editor.participants().len(), 1);
    }

    #[test]
    fn name_and_expiry_fields() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());

        press(&mut screen, &mut editor, KeyCode::Char('n'));
        type_text(&mut screen, &mut editor, "Team pulse");
        press(&mut screen, &mut editor, KeyCode::Enter);
        assert_eq!(editor.name(), "Team pulse");

        press(&mut screen, &mut editor, KeyCode::Char('x'));
        type_text(&mut screen, &mut editor, "tomorrow");
        press(&mut screen, &mut editor, KeyCode::Enter);
        assert!(screen.status().is_some());
        assert_eq!(editor.expire_date(), None);

        for _ in 0.."tomorrow".len() {
            press(&mut screen, &mut editor, KeyCode::Backspace);
        }
        type_text(&mut screen, &mut editor, "2030-06-01");
        press(&mut screen, &mut editor, KeyCode::Enter);
        assert_eq!(
            editor.expire_date().map(|d| d.to_string()),
            Some("2030-06-01".to_string())
        );
    }

    #[test]
    fn save_and_quit_keys() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        assert_eq!(ctrl(&mut screen, &mut editor, 's'), Some(EditorOutcome::Save));
        assert_eq!(
            press(&mut screen, &mut editor, KeyCode::Char('q')),
            Some(EditorOutcome::Quit)
        );
    }

    #[test]
    fn renders_questions_with_badges() {
        let mut editor = DraftEditor::new();
        let mut screen = EditorScreen::new(Theme::default());
        add_question(&mut screen, &mut editor, "How satisfied?", false);
        add_question(&mut screen, &mut editor, "Comments?", true);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| screen.draw(frame, &editor)).unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(rendered.contains("1. How satisfied?"));
        assert!(rendered.contains("[Likert scale]"));
        assert!(rendered.contains("2. Comments?"));
        assert!(rendered.contains("[Free text]"));
    }
}
