//! Login and logout

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password, theme::ColorfulTheme};
use survey_form::{CredentialStore, EmailAddress};

use super::Context;

pub async fn login(ctx: &mut Context, email: Option<String>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .validate_with(|input: &String| {
                EmailAddress::parse(input).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let client = ctx.public_client()?;
    let token = client.login(&email, &password).await?;
    ctx.credentials
        .set(token)
        .context("storing the access token")?;
    println!("Logged in as {}", email.trim());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.credentials
        .clear()
        .context("removing the access token")?;
    println!("Logged out");
    Ok(())
}
