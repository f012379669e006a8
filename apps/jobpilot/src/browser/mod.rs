//! Browser seam. The apply heuristic only ever talks to `Page`/`Element`;
//! `webdriver::WebDriverPage` drives a real Chrome session, tests use an
//! in-memory page.

pub mod webdriver;

#[cfg(test)]
pub mod fake;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

pub use webdriver::WebDriverPage;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Could not start a browser session at {url}: {message}")]
    Connect { url: String, message: String },

    #[error("WebDriver command failed: {0}")]
    Command(String),
}

/// How an element is looked up on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    XPath(String),
    Css(String),
    Id(String),
    Tag(String),
}

impl Locator {
    pub fn xpath(expr: impl Into<String>) -> Self {
        Locator::XPath(expr.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Locator::Tag(name.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::XPath(x) => write!(f, "xpath {x}"),
            Locator::Css(c) => write!(f, "css {c}"),
            Locator::Id(i) => write!(f, "id {i}"),
            Locator::Tag(t) => write!(f, "tag {t}"),
        }
    }
}

#[async_trait]
pub trait Element: Send + Sync + Sized {
    async fn is_displayed(&self) -> Result<bool, BrowserError>;
    async fn is_enabled(&self) -> Result<bool, BrowserError>;
    /// Rendered text of the element.
    async fn text(&self) -> Result<String, BrowserError>;
    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError>;
    /// Scrolls the element into view and clicks it.
    async fn click(&self) -> Result<(), BrowserError>;
    async fn clear(&self) -> Result<(), BrowserError>;
    async fn send_keys(&self, text: &str) -> Result<(), BrowserError>;
    /// Descendants of this element matching `locator`.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError>;
}

#[async_trait]
pub trait Page: Send + Sync {
    type Element: Element;

    async fn goto(&self, url: &str) -> Result<(), BrowserError>;
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, BrowserError>;
    /// Script scan over every `<button>` on the page; clicks the first whose
    /// text or aria-label contains `needle` (case-insensitive).
    async fn click_button_with_text(&self, needle: &str) -> Result<bool, BrowserError>;
    /// Masks `navigator.webdriver` on the current document.
    async fn hide_automation(&self) -> Result<(), BrowserError>;
}
