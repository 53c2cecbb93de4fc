//! # survey-form-http
//!
//! REST client for the survey persistence and public response services.
//!
//! `HttpClient` implements both `SurveyService` (authenticated, bearer token)
//! and `PublicSurveyService` (no credentials), so the same value can back the
//! editor and the participant wizard.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use survey_form::DraftEditor;
//! use survey_form_http::HttpClient;
//!
//! let client = HttpClient::new("http://localhost:8080/api")?;
//! let token = client.login("author@example.com", "secret").await?;
//! let client = client.with_token(token);
//!
//! let survey = editor.submit(&client).await?;
//! ```

mod client;
pub use client::HttpClient;

mod error;
pub use error::LoginError;
