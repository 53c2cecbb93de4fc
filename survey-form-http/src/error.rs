use serde::Deserialize;
use survey_form::{ServiceError, ValidationError};

/// Error type for [`HttpClient::login`](crate::HttpClient::login).
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Credentials were refused before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Build the error for a non-2xx response.
///
/// Prefers the body's `message`, then the status' canonical reason.
pub(crate) async fn rejection(response: reqwest::Response) -> ServiceError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
    ServiceError::rejected(Some(status.as_u16()), message)
}

pub(crate) fn transport(err: reqwest::Error) -> ServiceError {
    ServiceError::backend(err)
}
