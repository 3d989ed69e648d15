//! In-memory [`SessionDriver`] for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::{Locator, PageElement, SessionDriver};
use crate::error::{Result, SessionError};

type EventLog = Arc<Mutex<Vec<String>>>;

fn record(log: &EventLog, event: String) {
    if let Ok(mut events) = log.lock() {
        events.push(event);
    }
}

// ── FakeElement ───────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct FakeElement {
    label: String,
    text: String,
    visible: bool,
    failing: bool,
    children: HashMap<Locator, Vec<FakeElement>>,
    log: EventLog,
}

impl FakeElement {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visible: true,
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Every interaction fails with a command error.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_children(mut self, locator: Locator, children: Vec<FakeElement>) -> Self {
        self.children.insert(locator, children);
        self
    }

    fn attach(&mut self, log: &EventLog) {
        self.log = Arc::clone(log);
        for child in self.children.values_mut().flatten() {
            child.attach(log);
        }
    }

    fn act(&self, event: String) -> Result<()> {
        if self.failing {
            return Err(SessionError::Command(format!("{event} rejected")));
        }
        record(&self.log, event);
        Ok(())
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn clear(&self) -> Result<()> {
        self.act(format!("clear {}", self.label))
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.act(format!("send_keys {} {text}", self.label))
    }

    async fn click(&self) -> Result<()> {
        self.act(format!("click {}", self.label))
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self>> {
        Ok(self.children.get(locator).cloned().unwrap_or_default())
    }
}

// ── FakeDriver ────────────────────────────────────────────────────────────────

/// A page whose elements are registered up front by locator.
#[derive(Default)]
pub struct FakeDriver {
    elements: HashMap<Locator, FakeElement>,
    failing_navigation: bool,
    log: EventLog,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, locator: Locator, mut element: FakeElement) -> Self {
        element.attach(&self.log);
        self.elements.insert(locator, element);
        self
    }

    pub fn failing_navigation(mut self) -> Self {
        self.failing_navigation = true;
        self
    }

    /// Every recorded interaction, oldest first.
    pub fn events(&self) -> Vec<String> {
        self.log.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SessionDriver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        if self.failing_navigation {
            return Err(SessionError::Command(format!("navigate {url} rejected")));
        }
        record(&self.log, format!("navigate {url}"));
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<FakeElement> {
        self.elements
            .get(locator)
            .cloned()
            .ok_or_else(|| SessionError::ElementNotFound(locator.to_string()))
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<FakeElement>> {
        Ok(self.elements.get(locator).cloned().into_iter().collect())
    }

    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> Result<FakeElement> {
        match self.elements.get(locator) {
            Some(element) if element.visible => Ok(element.clone()),
            _ => Err(SessionError::Timeout {
                locator: locator.to_string(),
                secs: timeout.as_secs(),
            }),
        }
    }

    async fn close(&self) -> Result<()> {
        record(&self.log, "close".to_string());
        Ok(())
    }
}
