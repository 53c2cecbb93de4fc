use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use survey_form::{
    AccessToken, EmailAddress, ParticipantToken, PublicSurveyService, ResponseEntry,
    ResultsSummary, ServiceError, Survey, SurveyDraft, SurveyId, SurveyService, ValidationError,
};

use crate::LoginError;
use crate::error::{rejection, transport};

/// REST client for the survey API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    token: Option<AccessToken>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    responses: &'a [ResponseEntry],
}

impl HttpClient {
    /// Create a client for the API rooted at `base_url`, e.g. `http://localhost:8080/api`.
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url).map_err(ServiceError::backend)?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::backend(anyhow!(
                "API URL cannot be used as a base: {base_url}"
            )));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("survey-form-http/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;
        Ok(Self {
            base_url,
            token: None,
            client,
        })
    }

    /// Attach the author's bearer token.
    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn set_token(&mut self, token: Option<AccessToken>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Exchange author credentials for an access token.
    ///
    /// The email must be well-formed and the password non-empty; otherwise no
    /// request is sent.
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, LoginError> {
        let email = EmailAddress::parse(email).map_err(ValidationError::from)?;
        if password.is_empty() {
            return Err(ValidationError::EmptyPassword.into());
        }
        let request = self
            .request(Method::POST, &["auth", "login"])?
            .json(&LoginRequest {
                email: email.as_str(),
                password,
            });
        let response: LoginResponse = self.fetch(request).await?;
        tracing::info!(email = %email, "logged in");
        Ok(AccessToken::new(response.token))
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::backend(anyhow!("invalid API URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ServiceError> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    /// Build a request carrying the bearer token. Without a token nothing is sent.
    fn authorized(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ServiceError> {
        let token = self.token.as_ref().ok_or(ServiceError::Unauthenticated)?;
        Ok(self.request(method, segments)?.bearer_auth(token.expose()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "response received");
        if status.is_success() {
            Ok(response)
        } else {
            let err = rejection(response).await;
            tracing::warn!(status = status.as_u16(), error = %err, "request rejected");
            Err(err)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        self.execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(transport)
    }
}

#[async_trait]
impl SurveyService for HttpClient {
    async fn create(&self, draft: &SurveyDraft) -> Result<Survey, ServiceError> {
        let request = self.authorized(Method::POST, &["surveys"])?.json(draft);
        let survey: Survey = self.fetch(request).await?;
        tracing::info!(survey = %survey.id, "created survey");
        Ok(survey)
    }

    async fn update(&self, id: &SurveyId, draft: &SurveyDraft) -> Result<Survey, ServiceError> {
        let request = self
            .authorized(Method::PUT, &["surveys", id.as_str()])?
            .json(draft);
        let survey: Survey = self.fetch(request).await?;
        tracing::info!(survey = %survey.id, "updated survey");
        Ok(survey)
    }

    async fn list(&self) -> Result<Vec<Survey>, ServiceError> {
        self.fetch(self.authorized(Method::GET, &["surveys"])?).await
    }

    async fn get(&self, id: &SurveyId) -> Result<Survey, ServiceError> {
        self.fetch(self.authorized(Method::GET, &["surveys", id.as_str()])?)
            .await
    }

    async fn delete(&self, id: &SurveyId) -> Result<(), ServiceError> {
        self.execute(self.authorized(Method::DELETE, &["surveys", id.as_str()])?)
            .await?;
        tracing::info!(survey = %id, "deleted survey");
        Ok(())
    }

    async fn copy(&self, id: &SurveyId) -> Result<Survey, ServiceError> {
        let copy: Survey = self
            .fetch(self.authorized(Method::POST, &["surveys", id.as_str(), "copy"])?)
            .await?;
        tracing::info!(source = %id, survey = %copy.id, "copied survey");
        Ok(copy)
    }

    async fn send(&self, id: &SurveyId) -> Result<(), ServiceError> {
        self.execute(self.authorized(Method::POST, &["surveys", id.as_str(), "send"])?)
            .await?;
        tracing::info!(survey = %id, "sent survey");
        Ok(())
    }

    async fn results(&self, id: &SurveyId) -> Result<ResultsSummary, ServiceError> {
        self.fetch(self.authorized(Method::GET, &["surveys", id.as_str(), "results"])?)
            .await
    }
}

#[async_trait]
impl PublicSurveyService for HttpClient {
    async fn get_by_token(&self, token: &ParticipantToken) -> Result<Survey, ServiceError> {
        self.fetch(self.request(Method::GET, &["public", "surveys", token.as_str()])?)
            .await
    }

    async fn submit_responses(
        &self,
        token: &ParticipantToken,
        responses: &[ResponseEntry],
    ) -> Result<(), ServiceError> {
        let request = self
            .request(
                Method::POST,
                &["public", "surveys", token.as_str(), "responses"],
            )?
            .json(&SubmitRequest { responses });
        self.execute(request).await?;
        tracing::info!(answers = responses.len(), "submitted responses");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_segments_under_base_path() {
        let client = HttpClient::new("http://localhost:8080/api/").unwrap();
        let url = client.url(&["surveys", "42", "copy"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/surveys/42/copy");

        let client = HttpClient::new("http://localhost:8080/api").unwrap();
        let url = client.url(&["public", "surveys", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/public/surveys/a%2Fb");
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(HttpClient::new("mailto:someone@example.com").is_err());
        assert!(HttpClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn authenticated_call_without_token_sends_nothing() {
        let client = HttpClient::new("http://127.0.0.1:9").unwrap();
        let err = client.list().await.unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[tokio::test]
    async fn login_validates_before_sending() {
        let client = HttpClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.login("notanemail", "pw").await,
            Err(LoginError::Validation(ValidationError::Participant(_)))
        ));
        assert!(matches!(
            client.login("a@b.co", "").await,
            Err(LoginError::Validation(ValidationError::EmptyPassword))
        ));
    }
}
