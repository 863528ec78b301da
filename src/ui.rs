// UI layer: one flow per subcommand. Missing values are prompted for with
// `dialoguer`, network calls run under an `indicatif` spinner, and the
// result is printed to stdout. Errors are returned to `main`, which owns
// the error line and the exit code.

use crate::api::{ApiClient, SearchField};
use crate::cli::Cmd;
use crate::credentials::{CredentialStore, Credentials};
use crate::render;
use anyhow::Result;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run one subcommand to completion.
pub fn run(cmd: Cmd, api: &ApiClient, store: &CredentialStore) -> Result<()> {
    match cmd {
        Cmd::Signup { email, password } => handle_signup(api, email, password),
        Cmd::Configure { email, password } => handle_configure(api, store, email, password),
        Cmd::Add { urls } => {
            let creds = store.load()?;
            let added = with_spinner("Adding bookmarks...", || api.add_bookmarks(&creds, &urls))?;
            println!("{}", success_list("Added", &added));
            Ok(())
        }
        Cmd::Delete { urls } => {
            let creds = store.load()?;
            let deleted =
                with_spinner("Deleting bookmarks...", || api.delete_bookmarks(&creds, &urls))?;
            println!("{}", success_list("Deleted", &deleted));
            Ok(())
        }
        Cmd::Export => {
            let creds = store.load()?;
            let bookmarks = with_spinner("Exporting bookmarks...", || api.get_user_bookmarks(&creds))?;
            if !bookmarks.is_empty() {
                println!("{}", bookmarks.join("\n"));
            }
            Ok(())
        }
        Cmd::Search {
            query,
            field,
            url_only,
        } => handle_search(api, store, &query, field, url_only),
        Cmd::ResetPassword {
            email,
            token,
            new_password,
        } => handle_reset_password(api, email, token, new_password),
    }
}

fn handle_signup(api: &ApiClient, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = secret_or_prompt(password, "Password", false)?;

    with_spinner("Creating account...", || api.signup(&email, &password))?;
    println!(
        "Success! Your account has been created.\n\
         Please run [bobolink configure] to initialize your environment."
    );
    Ok(())
}

/// Exchange email/password for a token and persist both.
fn handle_configure(
    api: &ApiClient,
    store: &CredentialStore,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;
    let password = secret_or_prompt(password, "Password", true)?;

    let token = with_spinner("Fetching token...", || api.get_token(&email, &password))?;
    store.save(&Credentials::new(email, token.trim()))?;
    println!(
        "Success! Configuration written to {}.\nBobolink is ready to use.",
        store.path().display()
    );
    Ok(())
}

fn handle_search(
    api: &ApiClient,
    store: &CredentialStore,
    query: &str,
    field: Option<SearchField>,
    url_only: bool,
) -> Result<()> {
    let creds = store.load()?;
    let hits = with_spinner("Searching...", || api.search_bookmarks(&creds, query, field))?;
    if hits.is_empty() {
        println!("No matches.");
    } else {
        println!("{}", render::render_hits(&hits, url_only, field));
    }
    Ok(())
}

/// Without a token this first asks the service to mail one, then
/// collects it from the user.
fn handle_reset_password(
    api: &ApiClient,
    email: Option<String>,
    token: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    let email = value_or_prompt(email, "Email")?;

    let token = match token {
        Some(token) => token,
        None => {
            with_spinner("Requesting reset token...", || api.send_reset_token(&email))?;
            println!("A password reset token has been sent to {}.", email);
            Input::new().with_prompt("Reset token").interact_text()?
        }
    };
    let new_password = secret_or_prompt(new_password, "New password", true)?;

    with_spinner("Resetting password...", || {
        api.reset_password(&email, &new_password, &token)
    })?;
    println!("Success! Your password has been reset.\nRun [bobolink configure] to fetch a new token.");
    Ok(())
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// `Password` hides input; `confirm` asks for it twice.
fn secret_or_prompt(value: Option<String>, prompt: &str, confirm: bool) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    let mut input = Password::new();
    input.with_prompt(prompt);
    if confirm {
        input.with_confirmation("Repeat password", "Passwords do not match");
    }
    Ok(input.interact()?)
}

/// Show a spinner on stderr while `f` runs. The spinner is cleared
/// before anything else is printed.
fn with_spinner<T, E>(message: &'static str, f: impl FnOnce() -> Result<T, E>) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    Ok(result?)
}

fn success_list(verb: &str, urls: &[String]) -> String {
    let mut out = format!("Success! {}:", verb);
    for url in urls {
        out.push('\n');
        out.push_str(url);
    }
    out
}
