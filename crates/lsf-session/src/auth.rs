//! LSF login form submission.

use std::time::Duration;

use lsf_core::credentials::CredentialProvider;

use crate::driver::{Locator, PageElement, SessionDriver};
use crate::error::Result;

// ── LoginForm ─────────────────────────────────────────────────────────────────

/// Element ids of the portal's login form and how long to wait for each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username_id: String,
    pub password_id: String,
    pub submit_id: String,
    pub wait_timeout: Duration,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username_id: "asdf".to_string(),
            password_id: "fdsauhi".to_string(),
            submit_id: "loginForm:login".to_string(),
            wait_timeout: Duration::from_secs(10),
        }
    }
}

impl LoginForm {
    pub fn with_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }
}

// ── Login ─────────────────────────────────────────────────────────────────────

/// Fill in and submit the login form.
///
/// Every step's error is returned unchanged; callers decide whether a
/// failed login is fatal.
pub async fn authenticate<D, C>(
    driver: &D,
    login_url: &str,
    credentials: &C,
    form: &LoginForm,
) -> Result<()>
where
    D: SessionDriver,
    C: CredentialProvider + ?Sized,
{
    let username = credentials.username()?;
    let password = credentials.password()?;

    driver.navigate(login_url).await?;

    let username_field = driver
        .wait_for_visible(&Locator::id(&form.username_id), form.wait_timeout)
        .await?;
    username_field.clear().await?;
    username_field.send_keys(&username).await?;

    let password_field = driver
        .wait_for_visible(&Locator::id(&form.password_id), form.wait_timeout)
        .await?;
    password_field.clear().await?;
    password_field.send_keys(&password).await?;

    let login_button = driver
        .wait_for_visible(&Locator::id(&form.submit_id), form.wait_timeout)
        .await?;
    login_button.click().await?;

    Ok(())
}

/// [`authenticate`], logged and reduced to success or failure.
///
/// Never returns an error and never retries.
pub async fn login<D, C>(driver: &D, login_url: &str, credentials: &C, form: &LoginForm) -> bool
where
    D: SessionDriver,
    C: CredentialProvider + ?Sized,
{
    match authenticate(driver, login_url, credentials, form).await {
        Ok(()) => {
            tracing::info!("Logged in successfully.");
            true
        }
        Err(e) => {
            tracing::error!("Login failed: {e}");
            false
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
