//! Login and signup screens
//!
//! Credentials are format-checked before anything goes on the wire. A
//! failed check sets the inline message and returns without a request.

use super::error::DeskResult;
use super::events::UiEvents;
use super::route::Route;
use shared::validation::{self, ValidationError};
use shared::{LoginRequest, RegisterRequest};
use staff_client::{DirectoryApi, SessionStore};
use std::sync::Arc;
use std::time::Duration;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! You can now log in.";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed. Please try again.";

/// Notice display time plus a short pause before leaving the login screen
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(3_000);

/// Dependencies shared by the auth screens
#[derive(Clone)]
pub struct AuthContext {
    pub api: Arc<dyn DirectoryApi>,
    pub session: Arc<dyn SessionStore>,
    pub events: UiEvents,
    pub redirect_delay: Duration,
}

impl AuthContext {
    pub fn new(api: Arc<dyn DirectoryApi>, session: Arc<dyn SessionStore>, events: UiEvents) -> Self {
        Self {
            api,
            session,
            events,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Drop the token and go back to login
    pub fn logout(&self) -> DeskResult<()> {
        self.session.clear_token()?;
        tracing::info!("Logged out");
        self.events.navigate(Route::Login);
        Ok(())
    }
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Format check failed, nothing was sent
    Invalid(ValidationError),
    /// Server refused the credentials or was unreachable
    Rejected,
    /// Token stored, redirect scheduled
    LoggedIn,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
    error_message: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Live field indicator
    pub fn username_valid(&self) -> bool {
        validation::is_valid_username(&self.username)
    }

    /// Live field indicator
    pub fn password_valid(&self) -> bool {
        validation::is_valid_password(&self.password)
    }

    /// Inline message of the last submit
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub async fn submit(&mut self, ctx: &AuthContext) -> DeskResult<LoginOutcome> {
        self.error_message = None;

        if let Err(e) = validation::validate_credentials(&self.username, &self.password) {
            tracing::debug!(reason = %e, "Login form rejected");
            self.error_message = Some(e.to_string());
            return Ok(LoginOutcome::Invalid(e));
        }

        let request = LoginRequest::new(self.username.clone(), self.password.clone());
        match ctx.api.login(&request).await {
            Ok(response) => {
                ctx.session.set_token(&response.access_token)?;
                ctx.session.set_remember_me(self.remember_me)?;
                tracing::info!(username = %self.username, remember_me = self.remember_me, "Login successful");
                ctx.events.success(LOGIN_SUCCESS_MESSAGE);

                let events = ctx.events.clone();
                let delay = ctx.redirect_delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    events.navigate(Route::Employees);
                });
                Ok(LoginOutcome::LoggedIn)
            }
            Err(e) => {
                tracing::warn!(username = %self.username, error = %e, "Login failed");
                self.error_message = Some(LOGIN_FAILED_MESSAGE.to_string());
                ctx.events.error(LOGIN_FAILED_MESSAGE);
                Ok(LoginOutcome::Rejected)
            }
        }
    }
}

// ============================================================================
// Signup
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Invalid(ValidationError),
    /// Message shown to the user
    Failed(String),
    Registered,
}

/// Inline text of a signup format failure
pub fn signup_message(error: &ValidationError) -> &'static str {
    match error {
        ValidationError::InvalidUsername => {
            "Invalid username. Please ensure it meets the requirements (3-9 characters, no spaces, alphanumeric and underscores)."
        }
        ValidationError::InvalidPassword => {
            "Password must be at least 3 characters, include a number, and a special character."
        }
        ValidationError::PasswordMismatch => "Passwords do not match.",
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    /// Keep the username for the next visit to the signup screen
    pub remember_me: bool,
    error_message: Option<String>,
    success_message: Option<String>,
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            ..Self::default()
        }
    }

    /// Empty form with the remembered username filled in, if any
    pub fn prefilled(session: &dyn SessionStore) -> Self {
        match session.remembered_username() {
            Some(username) => Self {
                username,
                remember_me: true,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn with_remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_credentials(&self.username, &self.password)?;
        validation::validate_confirmation(&self.password, &self.confirm_password)
    }

    /// Register; stays on the signup screen either way
    pub async fn submit(&mut self, ctx: &AuthContext) -> SignupOutcome {
        self.error_message = None;
        self.success_message = None;

        if let Err(e) = self.validate() {
            self.error_message = Some(signup_message(&e).to_string());
            return SignupOutcome::Invalid(e);
        }

        let remembered = self.remember_me.then_some(self.username.as_str());
        if let Err(e) = ctx.session.set_remembered_username(remembered) {
            tracing::warn!(error = %e, "Failed to store remembered username");
        }

        let request = RegisterRequest::new(self.username.clone(), self.password.clone());
        match ctx.api.register(&request).await {
            Ok(_) => {
                tracing::info!(username = %self.username, "Signup successful");
                self.success_message = Some(SIGNUP_SUCCESS_MESSAGE.to_string());
                ctx.events.success(SIGNUP_SUCCESS_MESSAGE);
                SignupOutcome::Registered
            }
            Err(e) => {
                tracing::warn!(username = %self.username, error = %e, "Signup failed");
                let message = e
                    .server_message()
                    .unwrap_or(SIGNUP_FAILED_MESSAGE)
                    .to_string();
                self.error_message = Some(message.clone());
                ctx.events.error(message.clone());
                SignupOutcome::Failed(message)
            }
        }
    }
}
