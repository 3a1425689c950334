//! Interactive account creation for `--signup`.

use std::io::{self, BufRead, Write};

use color_eyre::eyre::{eyre, Result};
use tracing::info;

use crate::api::ChatApi;
use crate::models::SignupForm;

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Read the signup fields. The password comes from `read_password` so the
/// terminal does not echo it.
pub fn read_form<R, W, P>(input: &mut R, output: &mut W, read_password: P) -> Result<SignupForm>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> io::Result<String>,
{
    let first_name = prompt(input, output, "First name")?;
    let last_name = prompt(input, output, "Last name")?;
    let email = prompt(input, output, "Email")?;
    write!(output, "Password: ")?;
    output.flush()?;
    let password = read_password()?;
    let profile_image = prompt(input, output, "Avatar URL (optional)")?;

    let form = SignupForm {
        first_name,
        last_name,
        email,
        password,
        profile_image: Some(profile_image).filter(|url| !url.is_empty()),
    };
    if let Some(field) = form.missing_field() {
        return Err(eyre!("{} is required", field));
    }
    Ok(form)
}

/// Prompt on the terminal and submit the form.
pub async fn run_signup(api: &ChatApi) -> Result<()> {
    let form = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        read_form(&mut input, &mut io::stdout(), rpassword::read_password)?
    };

    api.signup(&form)
        .await
        .map_err(|e| eyre!(e.user_message()))?;
    info!(email = %form.email, "Signed up");
    println!("Account created. Sign in through the web app and start chitchat with --token <token>.");
    Ok(())
}
