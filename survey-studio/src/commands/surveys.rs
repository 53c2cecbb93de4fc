//! Survey commands

use anyhow::{Result, bail};
use dialoguer::{Confirm, theme::ColorfulTheme};
use survey_form::{DraftEditor, EditorError, SurveyId, SurveyService};
use survey_form_http::HttpClient;
use survey_form_ratatui::{EditorOutcome, RatatuiEditor};

use super::Context;
use crate::SurveyCommands;
use crate::output::{results_report, survey_details, survey_table};

pub async fn handle(action: SurveyCommands, ctx: &mut Context) -> Result<()> {
    let client = ctx.author_client()?;
    match action {
        SurveyCommands::List => {
            let surveys = client.list().await.map_err(|e| ctx.service_error(e))?;
            ctx.format.print(&surveys, |s| survey_table(s))?;
        }
        SurveyCommands::Show { id } => {
            let survey = client.get(&id.into()).await.map_err(|e| ctx.service_error(e))?;
            ctx.format.print(&survey, survey_details)?;
        }
        SurveyCommands::Create => {
            edit_until_saved(ctx, &client, DraftEditor::new()).await?;
        }
        SurveyCommands::Edit { id } => {
            let survey = client.get(&id.into()).await.map_err(|e| ctx.service_error(e))?;
            if !survey.is_draft() {
                bail!("Only draft surveys can be edited ('{}' is {})", survey.name, survey.status);
            }
            edit_until_saved(ctx, &client, DraftEditor::for_survey(&survey)).await?;
        }
        SurveyCommands::Delete { id, yes } => {
            let id = SurveyId::from(id);
            if !yes && !confirm(&format!("Delete survey {id}?"))? {
                return Ok(());
            }
            client.delete(&id).await.map_err(|e| ctx.service_error(e))?;
            println!("Deleted survey {id}");
        }
        SurveyCommands::Copy { id } => {
            let copy = client.copy(&id.into()).await.map_err(|e| ctx.service_error(e))?;
            println!("Created copy {} ({})", copy.name, copy.id);
        }
        SurveyCommands::Send { id, yes } => {
            let survey = client.get(&id.into()).await.map_err(|e| ctx.service_error(e))?;
            if !survey.is_draft() {
                bail!("Only draft surveys can be sent ('{}' is {})", survey.name, survey.status);
            }
            let prompt = format!(
                "Send '{}' to {} participant(s)?",
                survey.name,
                survey.participant_total()
            );
            if !yes && !confirm(&prompt)? {
                return Ok(());
            }
            client.send(&survey.id).await.map_err(|e| ctx.service_error(e))?;
            println!("Sent survey {}", survey.id);
        }
        SurveyCommands::Results { id } => {
            let summary = client
                .results(&id.into())
                .await
                .map_err(|e| ctx.service_error(e))?;
            ctx.format.print(&summary, results_report)?;
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Run the editor until the draft is saved or the author quits.
///
/// A failed save reopens the editor with the draft intact and the error shown.
async fn edit_until_saved(
    ctx: &mut Context,
    client: &HttpClient,
    mut editor: DraftEditor,
) -> Result<()> {
    let mut notice: Option<String> = None;
    loop {
        let mut tui = RatatuiEditor::new();
        if let Some(message) = notice.take() {
            tui = tui.with_notice(message);
        }
        match tui.run(&mut editor)? {
            EditorOutcome::Quit => {
                println!("No changes saved");
                return Ok(());
            }
            EditorOutcome::Save => match editor.submit(client).await {
                Ok(survey) => {
                    println!("Saved survey {} ({})", survey.name, survey.id);
                    return Ok(());
                }
                Err(EditorError::Request(err)) if err.is_unauthenticated() => {
                    return Err(ctx.service_error(err));
                }
                Err(err) => notice = Some(format!("Save failed: {err}")),
            },
        }
    }
}
