//! [`SessionDriver`] backed by a WebDriver server through `fantoccini`.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use tokio::time::Instant;

use crate::driver::{Locator, PageElement, SessionDriver};
use crate::error::{Result, SessionError};

/// Delay between visibility checks while waiting for an element.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn to_fantoccini(locator: &Locator) -> fantoccini::Locator<'_> {
    match locator {
        Locator::Id(id) => fantoccini::Locator::Id(id),
        Locator::XPath(path) => fantoccini::Locator::XPath(path),
        Locator::Css(sel) => fantoccini::Locator::Css(sel),
    }
}

fn command_error(err: fantoccini::error::CmdError) -> SessionError {
    SessionError::Command(err.to_string())
}

/// Chrome capabilities; adds `--headless` unless a visible window is wanted.
pub fn chrome_capabilities(headless: bool) -> serde_json::Map<String, serde_json::Value> {
    let mut args = vec!["--window-size=1280,1024"];
    if headless {
        args.push("--headless");
    }
    let mut caps = serde_json::Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

// ── WebDriverSession ──────────────────────────────────────────────────────────

/// A browser controlled over the WebDriver protocol.
#[derive(Clone)]
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Open a new browser session at `webdriver_url`.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        tracing::debug!(webdriver_url, headless, "opening WebDriver session");
        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(headless));
        let client = builder
            .connect(webdriver_url)
            .await
            .map_err(|e| SessionError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SessionDriver for WebDriverSession {
    type Element = WebDriverElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!(url, "navigating");
        self.client.goto(url).await.map_err(command_error)
    }

    async fn find_element(&self, locator: &Locator) -> Result<WebDriverElement> {
        self.client
            .find(to_fantoccini(locator))
            .await
            .map(WebDriverElement::from)
            .map_err(|e| SessionError::ElementNotFound(format!("{locator} ({e})")))
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<WebDriverElement>> {
        let found = self
            .client
            .find_all(to_fantoccini(locator))
            .await
            .map_err(command_error)?;
        Ok(found.into_iter().map(WebDriverElement::from).collect())
    }

    async fn wait_for_visible(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<WebDriverElement> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.client.find(to_fantoccini(locator)).await {
                if element.is_displayed().await.unwrap_or(false) {
                    return Ok(WebDriverElement::from(element));
                }
            }
            if Instant::now() >= deadline {
                return Err(SessionError::Timeout {
                    locator: locator.to_string(),
                    secs: timeout.as_secs(),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn close(&self) -> Result<()> {
        tracing::debug!("closing WebDriver session");
        self.client.clone().close().await.map_err(command_error)
    }
}

// ── WebDriverElement ──────────────────────────────────────────────────────────

pub struct WebDriverElement {
    inner: Element,
}

impl From<Element> for WebDriverElement {
    fn from(inner: Element) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl PageElement for WebDriverElement {
    async fn clear(&self) -> Result<()> {
        self.inner.clear().await.map_err(command_error)
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.inner.send_keys(text).await.map_err(command_error)
    }

    async fn click(&self) -> Result<()> {
        self.inner.click().await.map_err(command_error)
    }

    async fn text(&self) -> Result<String> {
        self.inner.text().await.map_err(command_error)
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>> {
        let found = self
            .inner
            .find_all(to_fantoccini(locator))
            .await
            .map_err(command_error)?;
        Ok(found.into_iter().map(Self::from).collect())
    }
}
