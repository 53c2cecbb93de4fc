//! CLI commands

pub mod auth;
pub mod respond;
pub mod surveys;

use anyhow::{Result, anyhow};
use survey_form::{CredentialStore, ServiceError};
use survey_form_http::HttpClient;

use crate::credentials::TokenFile;
use crate::output::OutputFormat;

/// Shared state handed to every command.
pub struct Context {
    pub api_url: String,
    pub format: OutputFormat,
    pub credentials: TokenFile,
}

impl Context {
    /// Client without credentials, for login and the public endpoints.
    pub fn public_client(&self) -> Result<HttpClient> {
        Ok(HttpClient::new(&self.api_url)?)
    }

    /// Client carrying the stored access token.
    pub fn author_client(&self) -> Result<HttpClient> {
        let token = self.credentials.get().ok_or_else(not_logged_in)?;
        Ok(self.public_client()?.with_token(token))
    }

    /// Turn a service error into a CLI error, dropping a token the server no longer accepts.
    pub fn service_error(&mut self, err: ServiceError) -> anyhow::Error {
        if err.is_unauthenticated() {
            if let Err(clear_err) = self.credentials.clear() {
                tracing::warn!(error = %clear_err, "could not remove stale token");
            }
            return not_logged_in();
        }
        err.into()
    }
}

fn not_logged_in() -> anyhow::Error {
    anyhow!("not logged in, run `survey-studio login`")
}
