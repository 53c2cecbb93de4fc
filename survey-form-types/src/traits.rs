use async_trait::async_trait;

use crate::{
    AccessToken, ParticipantToken, ResponseEntry, ResultsSummary, ServiceError, Survey,
    SurveyDraft, SurveyId,
};

/// Persistence service for authenticated authors.
///
/// Implementations attach the author's credentials to every call. Every
/// failure carries a message suitable for showing to the user as-is.
#[async_trait]
pub trait SurveyService: Send + Sync {
    /// Persist a new survey.
    async fn create(&self, draft: &SurveyDraft) -> Result<Survey, ServiceError>;

    /// Replace an existing survey with the contents of `draft`.
    async fn update(&self, id: &SurveyId, draft: &SurveyDraft) -> Result<Survey, ServiceError>;

    /// All surveys of the author.
    async fn list(&self) -> Result<Vec<Survey>, ServiceError>;

    async fn get(&self, id: &SurveyId) -> Result<Survey, ServiceError>;

    async fn delete(&self, id: &SurveyId) -> Result<(), ServiceError>;

    /// Duplicate a survey server-side; returns the new copy.
    async fn copy(&self, id: &SurveyId) -> Result<Survey, ServiceError>;

    /// Send the survey link to every participant.
    async fn send(&self, id: &SurveyId) -> Result<(), ServiceError>;

    async fn results(&self, id: &SurveyId) -> Result<ResultsSummary, ServiceError>;
}

/// Unauthenticated service used by participants following a survey link.
#[async_trait]
pub trait PublicSurveyService: Send + Sync {
    async fn get_by_token(&self, token: &ParticipantToken) -> Result<Survey, ServiceError>;

    /// Submit one entry per question. Each entry holds exactly one value,
    /// matching the question's answer type.
    async fn submit_responses(
        &self,
        token: &ParticipantToken,
        responses: &[ResponseEntry],
    ) -> Result<(), ServiceError>;
}

/// Storage for the author's bearer token.
pub trait CredentialStore {
    /// The error type for this store.
    type Error: Into<anyhow::Error>;

    fn get(&self) -> Option<AccessToken>;

    fn set(&mut self, token: AccessToken) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Whether an author session is available.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
