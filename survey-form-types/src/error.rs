/// Rejection of a participant email by the participant list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantError {
    /// Not of the form `local@domain.tld`.
    #[error("'{0}' is not a valid email address")]
    InvalidFormat(String),

    /// Already in the participant list (exact match).
    #[error("'{0}' has already been added")]
    Duplicate(String),
}

/// Input that the editor refuses before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Question text must not be empty")]
    EmptyQuestionText,

    #[error(transparent)]
    Participant(#[from] ParticipantError),

    #[error("'{0}' is not a date in YYYY-MM-DD format")]
    InvalidExpireDate(String),

    #[error("Likert value {0} is outside the 1-5 scale")]
    LikertOutOfRange(u8),

    #[error("Password must not be empty")]
    EmptyPassword,
}

/// Failure reported by a persistence or public response service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No access token is available; the author has to log in first.
    #[error("Not logged in")]
    Unauthenticated,

    /// The service answered with an error. The message is shown verbatim.
    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// Transport or decoding failure.
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl ServiceError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Create a rejection with a message and optional HTTP status.
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Check if this error means the session has no valid credentials.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
            || matches!(self, Self::Rejected { status: Some(401), .. })
    }
}
