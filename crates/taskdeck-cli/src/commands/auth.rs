use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use taskdeck_application::{Notice, Operation};
use taskdeck_core::session::SessionStatus;

use super::App;

fn read_password(provided: Option<String>) -> Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(app: &App, username: &str, password: Option<String>) -> Result<Option<Notice>> {
    let password = read_password(password)?;
    let result = app.session.login(username, &password).await;
    Ok(Some(Notice::for_result(Operation::Login, &result)))
}

pub async fn logout(app: &App) -> Result<Option<Notice>> {
    app.session.logout().await;
    Ok(Some(Notice::for_result(
        Operation::Logout,
        &taskdeck_core::Result::Ok(()),
    )))
}

pub async fn register(
    app: &App,
    email: &str,
    username: &str,
    password: Option<String>,
) -> Result<Option<Notice>> {
    let password = read_password(password)?;
    let result = app.session.register(email, username, &password).await;
    Ok(Some(Notice::for_result(Operation::Register, &result)))
}

pub async fn whoami(app: &App) -> Result<Option<Notice>> {
    match app.session.restore_session().await {
        SessionStatus::Authenticated(profile) => {
            println!("{} <{}>", profile.username, profile.email);
            Ok(None)
        }
        SessionStatus::NotAuthenticated => Ok(Some(Notice::error("Not logged in"))),
    }
}
