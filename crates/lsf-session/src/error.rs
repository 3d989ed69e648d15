use lsf_core::LsfError;
use thiserror::Error;

/// Errors raised at the browser-session boundary.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No WebDriver session could be opened.
    #[error("Failed to connect to WebDriver: {0}")]
    Connect(String),

    /// A WebDriver command was rejected or failed in transit.
    #[error("WebDriver command failed: {0}")]
    Command(String),

    /// A lookup found no matching element.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// An element did not become visible in time.
    #[error("Timed out after {secs}s waiting for {locator}")]
    Timeout { locator: String, secs: u64 },

    /// The credential provider could not supply a value.
    #[error(transparent)]
    Credential(#[from] LsfError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
