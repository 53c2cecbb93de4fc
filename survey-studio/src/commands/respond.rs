//! Answer a survey as a participant

use anyhow::Result;
use survey_form::{ParticipantToken, PublicSurveyService, ResponseSession};
use survey_form_ratatui::{RatatuiWizard, WizardOutcome};

use super::Context;

pub async fn handle(token: String, ctx: &Context) -> Result<()> {
    let client = ctx.public_client()?;
    let token = ParticipantToken::new(token);
    let survey = client.get_by_token(&token).await?;
    let mut session = ResponseSession::new(survey)?;

    let mut notice: Option<String> = None;
    loop {
        let mut wizard = RatatuiWizard::new();
        if let Some(message) = notice.take() {
            wizard = wizard.with_notice(message);
        }
        match wizard.run(&mut session)? {
            WizardOutcome::Cancel => {
                println!("Cancelled, nothing was submitted");
                return Ok(());
            }
            WizardOutcome::Submit => match session.submit(&client, &token).await {
                Ok(()) => {
                    println!("Thank you! Your responses have been recorded.");
                    return Ok(());
                }
                Err(err) => notice = Some(format!("Submitting failed: {err}")),
            },
        }
    }
}
