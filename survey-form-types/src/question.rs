use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{QuestionId, ValidationError};

/// How a participant answers a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerType {
    /// Five-point agreement scale.
    #[default]
    Likert,

    /// Open-ended written answer.
    FreeText,
}

impl AnswerType {
    /// Human-readable label for badges and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Likert => "Likert scale",
            Self::FreeText => "Free text",
        }
    }

    /// The other answer type.
    pub fn toggled(self) -> Self {
        match self {
            Self::Likert => Self::FreeText,
            Self::FreeText => Self::Likert,
        }
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single question of a survey.
///
/// The text is always trimmed and non-empty when built through [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<QuestionId>,

    text: String,

    answer_type: AnswerType,
}

impl Question {
    /// Create a new, not yet persisted question.
    pub fn new(text: impl AsRef<str>, answer_type: AnswerType) -> Result<Self, ValidationError> {
        Ok(Self {
            id: None,
            text: normalize_text(text.as_ref())?,
            answer_type,
        })
    }

    /// Attach a server-assigned id.
    pub fn with_id(mut self, id: impl Into<QuestionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&QuestionId> {
        self.id.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answer_type(&self) -> AnswerType {
        self.answer_type
    }

    /// A copy of this question without its identifier.
    pub fn duplicate(&self) -> Self {
        Self {
            id: None,
            text: self.text.clone(),
            answer_type: self.answer_type,
        }
    }

    /// Merge the fields present in `patch` into this question.
    ///
    /// Nothing changes when the patch carries invalid text.
    pub fn apply(&mut self, patch: QuestionPatch) -> Result<(), ValidationError> {
        if let Some(text) = patch.text {
            self.text = normalize_text(&text)?;
        }
        if let Some(answer_type) = patch.answer_type {
            self.answer_type = answer_type;
        }
        Ok(())
    }
}

/// A partial question used for in-place updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub answer_type: Option<AnswerType>,
}

impl QuestionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn answer_type(mut self, answer_type: AnswerType) -> Self {
        self.answer_type = Some(answer_type);
        self
    }
}

impl From<Question> for QuestionPatch {
    fn from(question: Question) -> Self {
        Self {
            text: Some(question.text),
            answer_type: Some(question.answer_type),
        }
    }
}

fn normalize_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuestionText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_text() {
        let q = Question::new("  How satisfied?  ", AnswerType::Likert).unwrap();
        assert_eq!(q.text(), "How satisfied?");
        assert_eq!(q.id(), None);
    }

    #[test]
    fn new_rejects_blank_text() {
        let err = Question::new("   ", AnswerType::FreeText).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyQuestionText));
    }

    #[test]
    fn duplicate_drops_id() {
        let q = Question::new("Q1", AnswerType::FreeText)
            .unwrap()
            .with_id("q-1");
        let copy = q.duplicate();
        assert_eq!(copy.id(), None);
        assert_eq!(copy.text(), "Q1");
        assert_eq!(copy.answer_type(), AnswerType::FreeText);
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut q = Question::new("Q1", AnswerType::Likert).unwrap().with_id("q-1");
        q.apply(QuestionPatch::new().answer_type(AnswerType::FreeText))
            .unwrap();
        assert_eq!(q.text(), "Q1");
        assert_eq!(q.answer_type(), AnswerType::FreeText);
        assert_eq!(q.id().map(QuestionId::as_str), Some("q-1"));
    }

    #[test]
    fn apply_with_blank_text_leaves_question_untouched() {
        let mut q = Question::new("Q1", AnswerType::Likert).unwrap();
        let result = q.apply(
            QuestionPatch::new()
                .text(" ")
                .answer_type(AnswerType::FreeText),
        );
        assert!(result.is_err());
        assert_eq!(q.text(), "Q1");
        assert_eq!(q.answer_type(), AnswerType::Likert);
    }

    #[test]
    fn wire_format() {
        let q = Question::new("Comments?", AnswerType::FreeText).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Comments?", "answerType": "FREE_TEXT" })
        );

        let parsed: Question =
            serde_json::from_str(r#"{"id":"7","text":"Q","answerType":"LIKERT"}"#).unwrap();
        assert_eq!(parsed.id().map(QuestionId::as_str), Some("7"));
        assert_eq!(parsed.answer_type(), AnswerType::Likert);
    }
}
