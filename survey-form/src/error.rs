use survey_form_types::{AnswerType, ServiceError, ValidationError};

/// Error type for draft editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The input was refused; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An index from a stale view of the question list.
    #[error("Question index {index} is out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The question editor is not open")]
    QuestionModalClosed,

    #[error("The participants editor is not open")]
    ParticipantsModalClosed,

    /// A save request is still outstanding.
    #[error("The survey is already being saved")]
    SubmitInFlight,

    /// The persistence service refused or failed the save. The draft is kept.
    #[error(transparent)]
    Request(#[from] ServiceError),
}

impl EditorError {
    /// Check if this error was caused by user input rather than a bug or the service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Error type for the participant response flow.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("This survey has no questions")]
    EmptySurvey,

    /// Positions are zero-based question indices.
    #[error("Please answer every question before submitting ({} unanswered)", positions.len())]
    Unanswered { positions: Vec<usize> },

    #[error("Question {} has no identifier and cannot be answered", position + 1)]
    MissingQuestionId { position: usize },

    #[error("This question expects a {expected} answer")]
    AnswerTypeMismatch { expected: AnswerType },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The responses are already being submitted")]
    SubmitInFlight,

    #[error("The responses have already been submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Request(#[from] ServiceError),
}
