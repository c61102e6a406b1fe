use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::{api::ApiClient, session_store};

/// Prompts for email and password, signs in and saves the session cookie.
///
/// The password is read without echo and never printed.
pub async fn run_login(api_url: &str) -> Result<()> {
    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin()
        .lock()
        .read_line(&mut email)
        .context("Failed to read email")?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let client = ApiClient::new(api_url, None)?;
    let me = client.login(email.trim(), &password).await?;
    let session_id = client
        .session_id()
        .context("Server did not return a session cookie")?;

    session_store::save_session(&session_id)?;
    println!("Signed in as {}. Session saved.", me.name);
    Ok(())
}
