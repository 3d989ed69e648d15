//! Browser-session abstraction used by the login and scraping flows.
//!
//! Only the handful of primitives the LSF flows need are modelled: navigate,
//! look elements up, wait for visibility, type, click and read text. The
//! production implementation lives in [`crate::webdriver`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// ── Locator ───────────────────────────────────────────────────────────────────

/// How an element is looked up on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    XPath(String),
    Css(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Self::XPath(path.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::XPath(path) => write!(f, "xpath={path}"),
            Self::Css(sel) => write!(f, "css={sel}"),
        }
    }
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// One element on the current page.
#[async_trait]
pub trait PageElement: Send + Sync + Sized {
    async fn clear(&self) -> Result<()>;
    async fn send_keys(&self, text: &str) -> Result<()>;
    async fn click(&self) -> Result<()>;
    /// Rendered (visible) text of the element.
    async fn text(&self) -> Result<String>;
    /// Descendants matching `locator`; an empty list is not an error.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>>;
}

/// A live browser session.
///
/// The session handle is always passed explicitly; nothing here keeps global
/// state.
#[async_trait]
pub trait SessionDriver: Send + Sync {
    type Element: PageElement;

    async fn navigate(&self, url: &str) -> Result<()>;

    /// First element matching `locator`; fails at once when there is none.
    async fn find_element(&self, locator: &Locator) -> Result<Self::Element>;

    /// All elements matching `locator`; an empty list is not an error.
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// Block until an element matching `locator` is displayed, up to `timeout`.
    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<Self::Element>;

    /// End the session. Must be called on every exit path.
    async fn close(&self) -> Result<()>;
}
