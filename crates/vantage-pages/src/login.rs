//! Login page.

use crate::base::PageObject;
use async_trait::async_trait;
use vantage_browser::{Locator, Result, Role, Session};

/// The login form: credential inputs, submit button, and the alert
/// shown on rejected credentials.
pub struct LoginPage<'a> {
    session: &'a Session,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_message: Locator,
}

impl<'a> LoginPage<'a> {
    /// Bind a login page to a session.
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            username_input: Locator::label("Username"),
            password_input: Locator::label("Password"),
            login_button: Locator::role(Role::Button, "Log in"),
            error_message: Locator::role_only(Role::Alert),
        }
    }

    /// Fill both credential fields and submit the form.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        tracing::debug!(username, "submitting login form");
        self.session.fill(&self.username_input, username).await?;
        self.session.fill(&self.password_input, password).await?;
        self.session.click(&self.login_button).await
    }

    /// Assert the form's inputs and submit button are visible.
    pub async fn verify_form_visible(&self) -> Result<()> {
        self.session
            .expect_visible(&self.username_input, "username input")
            .await?;
        self.session
            .expect_visible(&self.password_input, "password input")
            .await?;
        self.session
            .expect_visible(&self.login_button, "login button")
            .await
    }

    /// Assert the login error alert is visible with exactly this text.
    pub async fn verify_login_error(&self, expected: &str) -> Result<()> {
        self.session
            .expect_visible(&self.error_message, "login error alert")
            .await?;
        self.session.expect_text(&self.error_message, expected).await
    }
}

#[async_trait]
impl PageObject for LoginPage<'_> {
    fn session(&self) -> &Session {
        self.session
    }

    fn path(&self) -> &str {
        "/login"
    }
}
