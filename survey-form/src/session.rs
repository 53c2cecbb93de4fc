//! Modal state owned by the draft editor.

use survey_form_types::{AnswerType, EmailAddress, ParticipantError, Question, ValidationError};

use crate::ParticipantList;

/// Whether the question modal adds a new question or edits one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Adding,
    Editing(usize),
}

/// The fields of the question modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub text: String,
    pub answer_type: AnswerType,
}

impl QuestionForm {
    /// Blank form for adding. New questions default to a Likert scale.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn new(text: impl Into<String>, answer_type: AnswerType) -> Self {
        Self {
            text: text.into(),
            answer_type,
        }
    }

    /// Form pre-populated from an existing question.
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text().to_string(),
            answer_type: question.answer_type(),
        }
    }

    /// Whether the save action should be enabled.
    pub fn is_submittable(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn to_question(&self) -> Result<Question, ValidationError> {
        Question::new(&self.text, self.answer_type)
    }
}

/// An open question modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionModal {
    mode: EditMode,
    pub form: QuestionForm,
}

impl QuestionModal {
    pub(crate) fn adding() -> Self {
        Self {
            mode: EditMode::Adding,
            form: QuestionForm::blank(),
        }
    }

    pub(crate) fn editing(index: usize, question: &Question) -> Self {
        Self {
            mode: EditMode::Editing(index),
            form: QuestionForm::from_question(question),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditMode::Adding => "Add question",
            EditMode::Editing(_) => "Edit question",
        }
    }
}

/// An open participants modal.
///
/// Edits apply to a working copy. Saving replaces the draft's list, closing
/// discards the copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantsModal {
    working: ParticipantList,
    pub input: String,
}

impl ParticipantsModal {
    pub(crate) fn new(participants: &ParticipantList) -> Self {
        Self {
            working: participants.clone(),
            input: String::new(),
        }
    }

    /// Validate the input field and append it to the working copy.
    ///
    /// The input is cleared only on success; blank input is ignored.
    pub fn add_input(&mut self) -> Result<Option<&EmailAddress>, ParticipantError> {
        if self.input.trim().is_empty() {
            return Ok(None);
        }
        let email = EmailAddress::parse(&self.input)?;
        let added = self.working.push(email)?;
        self.input.clear();
        Ok(Some(added))
    }

    pub fn remove(&mut self, index: usize) -> Option<EmailAddress> {
        self.working.remove(index)
    }

    pub fn participants(&self) -> &ParticipantList {
        &self.working
    }

    pub(crate) fn into_participants(self) -> ParticipantList {
        self.working
    }
}
