//! Account and session commands

use colored::Colorize;
use is_terminal::IsTerminal;

use crate::cli::args::{LoginArgs, OutputFormat, ProfileArgs, ProfileCommands, RegisterArgs};
use crate::error::{AuthError, Result, UniscoutError};
use crate::output;
use crate::session::{Registration, SessionStore, UserRecord};

/// Read a password from the terminal without echoing it
fn prompt_password(prompt: &str) -> Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(UniscoutError::InvalidArgument(
            "password required: pass --password or run interactively".to_string(),
        ));
    }
    Ok(rpassword::prompt_password(prompt)?)
}

fn require_user(session: &SessionStore) -> Result<UserRecord> {
    session
        .current_user()
        .ok_or_else(|| AuthError::NotLoggedIn.into())
}

/// Handle the register command
pub fn register(session: &SessionStore, args: &RegisterArgs, format: OutputFormat) -> Result<String> {
    let (password, confirm_password) = match &args.password {
        Some(password) => (
            password.clone(),
            args.confirm_password.clone().unwrap_or_else(|| password.clone()),
        ),
        None => (
            prompt_password("Password: ")?,
            prompt_password("Confirm password: ")?,
        ),
    };

    let form = Registration {
        email: args.email.trim().to_string(),
        password,
        confirm_password,
        name: args.name.trim().to_string(),
        student_id: args.student_id.trim().to_string(),
        faculty: args.faculty.clone(),
        year: args.year.clone(),
    };

    let user = session.register(&form)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Registered and logged in as {} <{}>",
            "✓".green(),
            user.name.bold(),
            user.email
        )),
        OutputFormat::Json => output::format_user(&user, format),
    }
}

/// Handle the login command
pub fn login(session: &SessionStore, args: &LoginArgs, format: OutputFormat) -> Result<String> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt_password("Password: ")?,
    };

    let user = session.login(args.email.trim(), &password)?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Logged in as {}", "✓".green(), user.name.bold())),
        OutputFormat::Json => output::format_user(&user, format),
    }
}

/// Handle the logout command
pub fn logout(session: &SessionStore, format: OutputFormat) -> Result<String> {
    let was_logged_in = session.is_authenticated();
    session.logout()?;

    match format {
        OutputFormat::Pretty if was_logged_in => Ok(format!("{} Logged out", "✓".green())),
        OutputFormat::Pretty => Ok("Not logged in.".to_string()),
        OutputFormat::Json => {
            let result = serde_json::json!({ "logged_out": was_logged_in });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Handle the whoami command
pub fn whoami(session: &SessionStore, format: OutputFormat) -> Result<String> {
    let user = require_user(session)?;
    output::format_user(&user, format)
}

/// Handle the profile command
pub fn profile(session: &SessionStore, args: &ProfileArgs, format: OutputFormat) -> Result<String> {
    let mut user = require_user(session)?;

    match &args.command {
        ProfileCommands::Show => output::format_user(&user, format),
        ProfileCommands::Update { name, faculty, year } => {
            if name.is_none() && faculty.is_none() && year.is_none() {
                return Err(UniscoutError::InvalidArgument(
                    "nothing to update: pass --name, --faculty or --year".to_string(),
                ));
            }

            if let Some(name) = name {
                user.name = name.trim().to_string();
            }
            if let Some(faculty) = faculty {
                user.faculty = faculty.clone();
            }
            if let Some(year) = year {
                user.year = year.clone();
            }

            session.update_profile(&user)?;

            match format {
                OutputFormat::Pretty => Ok(format!(
                    "{} Profile updated\n\n{}",
                    "✓".green(),
                    output::pretty::format_user(&user)
                )),
                OutputFormat::Json => output::format_user(&user, format),
            }
        }
    }
}
