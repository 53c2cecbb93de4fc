use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnswerType, QuestionId, ValidationError};

/// A point on the five-point agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertValue(u8);

impl LikertValue {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::LikertOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Label shown next to the scale point.
    pub fn label(self) -> &'static str {
        likert_label(self.0).unwrap_or_default()
    }

    /// All scale points, lowest first.
    pub fn all() -> impl DoubleEndedIterator<Item = LikertValue> {
        (Self::MIN..=Self::MAX).map(LikertValue)
    }
}

impl TryFrom<u8> for LikertValue {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LikertValue> for u8 {
    fn from(value: LikertValue) -> Self {
        value.0
    }
}

impl fmt::Display for LikertValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.0, self.label())
    }
}

/// Label for a raw scale point, if it is on the scale.
pub fn likert_label(value: u8) -> Option<&'static str> {
    match value {
        1 => Some("Strongly disagree"),
        2 => Some("Disagree"),
        3 => Some("Neutral"),
        4 => Some("Agree"),
        5 => Some("Strongly agree"),
        _ => None,
    }
}

/// The answer given to one question.
///
/// Serialised as exactly one of `likertValue` or `textValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseValue {
    #[serde(rename = "likertValue")]
    Likert(LikertValue),

    #[serde(rename = "textValue")]
    Text(String),
}

impl ResponseValue {
    /// The answer type this value belongs to.
    pub fn answer_type(&self) -> AnswerType {
        match self {
            Self::Likert(_) => AnswerType::Likert,
            Self::Text(_) => AnswerType::FreeText,
        }
    }

    pub fn as_likert(&self) -> Option<LikertValue> {
        match self {
            Self::Likert(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// An empty text answer counts as no answer.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<LikertValue> for ResponseValue {
    fn from(v: LikertValue) -> Self {
        Self::Likert(v)
    }
}

impl From<String> for ResponseValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for ResponseValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One entry of a participant's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub question_id: QuestionId,

    #[serde(flatten)]
    pub value: ResponseValue,
}
