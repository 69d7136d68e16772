pub mod auth_client;
mod config;
mod session_store;

pub use auth_client::SignInClient;
pub use config::Settings;
pub use session_store::SessionStore;

use crate::common::Session;
use crate::error::AuthError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

const MAX_ATTEMPTS: usize = 3;

/// Sign-in form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

/// Field-level checks run before any request is made.
///
/// The user id must look like an email address and the password must not be
/// empty.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), AuthError> {
    let user_id = credentials.user_id.trim();
    if user_id.is_empty() {
        return Err(AuthError::InvalidCredentials("Email is required".into()));
    }
    if !is_valid_email(user_id) {
        return Err(AuthError::InvalidCredentials(
            "Please enter a valid email address".into(),
        ));
    }
    if credentials.password.is_empty() {
        return Err(AuthError::InvalidCredentials("Password is required".into()));
    }
    Ok(())
}

fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Authenticate the user before starting the TUI.
///
/// Reuses a stored session when one exists, otherwise prompts on the terminal
/// and signs in against the backend.
pub async fn authenticate(settings: &Settings) -> Result<Session, AuthError> {
    let store = SessionStore::new()?;

    if let Some(session) = store.load()? {
        tracing::info!("Reusing stored session for {}", session.user_id);
        return Ok(session);
    }

    let client = SignInClient::new(
        settings.api_base(),
        Duration::from_secs(settings.request_timeout_secs),
    )?;

    println!("\n=== Tally Sign In ===\n");

    let mut last_error = None;

    for _ in 0..MAX_ATTEMPTS {
        let credentials = if std::io::stdin().is_terminal() {
            read_credentials(&mut std::io::stdin().lock(), read_hidden)?
        } else {
            let mut input = std::io::stdin().lock();
            let user_id = prompt(&mut input, "Email: ")?;
            let password = prompt(&mut input, "Password: ")?;
            Credentials { user_id, password }
        };

        if let Err(e) = validate_credentials(&credentials) {
            eprintln!("{}", e);
            last_error = Some(e);
            continue;
        }

        match client
            .sign_in(credentials.user_id.trim(), &credentials.password)
            .await
        {
            Ok(session) => {
                store.save(&session)?;
                println!("✓ Signed in as {}\n", session.user_id);
                return Ok(session);
            }
            Err(e) => {
                tracing::warn!("Sign in failed: {}", e);
                eprintln!("{}", e);
                last_error = Some(e.into());
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AuthError::InvalidCredentials("Sign in aborted".into())))
}

/// Forget the stored session.
pub fn sign_out() -> Result<(), AuthError> {
    SessionStore::new()?.delete()
}

fn read_credentials(
    input: &mut impl BufRead,
    read_password: impl FnOnce(&str) -> Result<String, AuthError>,
) -> Result<Credentials, AuthError> {
    Ok(Credentials {
        user_id: prompt(input, "Email: ")?,
        password: read_password("Password: ")?,
    })
}

/// Outcome of one key press while typing a hidden value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HiddenKey {
    Continue,
    Submit,
    Abort,
}

fn apply_hidden_key(buffer: &mut String, key: KeyEvent) -> HiddenKey {
    if key.kind == KeyEventKind::Release {
        return HiddenKey::Continue;
    }
    match key.code {
        KeyCode::Enter => HiddenKey::Submit,
        KeyCode::Esc => HiddenKey::Abort,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            HiddenKey::Abort
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            HiddenKey::Continue
        }
        KeyCode::Backspace => {
            buffer.pop();
            HiddenKey::Continue
        }
        _ => HiddenKey::Continue,
    }
}

/// Restores cooked mode even when reading fails.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, AuthError> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read a line from the terminal without echoing it.
fn read_hidden(label: &str) -> Result<String, AuthError> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut buffer = String::new();
    let outcome = {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                match apply_hidden_key(&mut buffer, key) {
                    HiddenKey::Continue => continue,
                    outcome => break outcome,
                }
            }
        }
    };
    println!();

    match outcome {
        HiddenKey::Abort => Err(AuthError::InvalidCredentials("Sign in aborted".into())),
        _ => Ok(buffer),
    }
}

fn prompt(input: &mut impl BufRead, label: &str) -> Result<String, AuthError> {
    print!("{}", label);
    std::io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(AuthError::InvalidCredentials("Sign in aborted".into()));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(user_id: &str, password: &str) -> Credentials {
        Credentials {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials(&credentials("me@example.com", "hunter2")).is_ok());
        assert!(validate_credentials(&credentials("  me@mail.example.org ", "x")).is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        for user_id in ["", "me", "me@", "@example.com", "me@example", "me @example.com", "a@b@c.com"] {
            assert!(
                validate_credentials(&credentials(user_id, "pw")).is_err(),
                "{user_id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_required() {
        let err = validate_credentials(&credentials("me@example.com", "")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials: Password is required");
    }

    #[test]
    fn test_read_credentials_trims_newlines() {
        let mut input = std::io::Cursor::new("me@example.com\r\n");
        let creds = read_credentials(&mut input, |label| {
            assert_eq!(label, "Password: ");
            Ok("secret".to_string())
        })
        .unwrap();
        assert_eq!(creds, credentials("me@example.com", "secret"));
        assert!(prompt(&mut input, "").is_err());
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_hidden_input_edits_and_submits() {
        let mut buffer = String::new();
        for c in "hunterx".chars() {
            assert_eq!(apply_hidden_key(&mut buffer, press(KeyCode::Char(c))), HiddenKey::Continue);
        }
        apply_hidden_key(&mut buffer, press(KeyCode::Backspace));
        apply_hidden_key(&mut buffer, press(KeyCode::Char('2')));
        apply_hidden_key(&mut buffer, press(KeyCode::Left));
        assert_eq!(apply_hidden_key(&mut buffer, press(KeyCode::Enter)), HiddenKey::Submit);
        assert_eq!(buffer, "hunter2");
    }

    #[test]
    fn test_hidden_input_aborts_on_ctrl_c() {
        let mut buffer = String::from("abc");
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_hidden_key(&mut buffer, ctrl_c), HiddenKey::Abort);
        assert_eq!(buffer, "abc");

        let mut release = press(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert_eq!(apply_hidden_key(&mut buffer, release), HiddenKey::Continue);
        assert_eq!(buffer, "abc");
    }
}
