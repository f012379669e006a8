use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::{info, warn};

use super::{BrowserError, Element, Locator, Page};

const CHROME_ARGS: [&str; 5] = [
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-blink-features=AutomationControlled",
    "--window-size=1440,900",
    "--start-maximized",
];

const HIDE_WEBDRIVER_JS: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

const SCROLL_AND_CLICK_JS: &str = "arguments[0].scrollIntoView(true); arguments[0].click();";

const CLICK_BUTTON_WITH_TEXT_JS: &str = r#"
    var needle = arguments[0].toLowerCase();
    var buttons = document.querySelectorAll('button');
    for (var i = 0; i < buttons.length; i++) {
        var txt = (buttons[i].innerText || '').toLowerCase();
        var aria = (buttons[i].getAttribute('aria-label') || '').toLowerCase();
        if (txt.includes(needle) || aria.includes(needle)) {
            buttons[i].click();
            return true;
        }
    }
    return false;
"#;

impl From<WebDriverError> for BrowserError {
    fn from(e: WebDriverError) -> Self {
        BrowserError::Command(e.to_string())
    }
}

/// A Chrome session behind a chromedriver endpoint.
pub struct WebDriverPage {
    driver: WebDriver,
}

pub struct WebDriverElement {
    element: WebElement,
    driver: WebDriver,
}

impl WebDriverPage {
    /// Starts a Chrome session at `webdriver_url` (chromedriver must already
    /// be listening there).
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, BrowserError> {
        let connect_err = |e: WebDriverError| BrowserError::Connect {
            url: webdriver_url.to_string(),
            message: e.to_string(),
        };

        let mut caps = DesiredCapabilities::chrome();
        for arg in CHROME_ARGS {
            caps.add_arg(arg).map_err(connect_err)?;
        }
        if headless {
            caps.add_arg("--headless=new").map_err(connect_err)?;
        }
        caps.add_experimental_option("excludeSwitches", vec!["enable-automation"])
            .map_err(connect_err)?;

        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(connect_err)?;
        info!("Browser session started (headless: {headless})");
        Ok(Self { driver })
    }

    /// Ends the session. Errors are logged; there is nothing left to do with
    /// a session that will not close.
    pub async fn quit(self) {
        if let Err(e) = self.driver.quit().await {
            warn!("Failed to quit browser: {e}");
        }
    }

    fn wrap(&self, element: WebElement) -> WebDriverElement {
        WebDriverElement {
            element,
            driver: self.driver.clone(),
        }
    }
}

fn by(locator: &Locator) -> By {
    match locator {
        Locator::XPath(x) => By::XPath(x.as_str()),
        Locator::Css(c) => By::Css(c.as_str()),
        Locator::Id(i) => By::Id(i.as_str()),
        Locator::Tag(t) => By::Tag(t.as_str()),
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = WebDriverElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<WebDriverElement>, BrowserError> {
        let found = self.driver.find_all(by(locator)).await?;
        Ok(found.into_iter().map(|e| self.wrap(e)).collect())
    }

    async fn click_button_with_text(&self, needle: &str) -> Result<bool, BrowserError> {
        let ret = self
            .driver
            .execute(CLICK_BUTTON_WITH_TEXT_JS, vec![serde_json::json!(needle)])
            .await?;
        Ok(ret.json().as_bool().unwrap_or(false))
    }

    async fn hide_automation(&self) -> Result<(), BrowserError> {
        self.driver.execute(HIDE_WEBDRIVER_JS, Vec::new()).await?;
        Ok(())
    }
}

#[async_trait]
impl Element for WebDriverElement {
    async fn is_displayed(&self) -> Result<bool, BrowserError> {
        Ok(self.element.is_displayed().await?)
    }

    async fn is_enabled(&self) -> Result<bool, BrowserError> {
        Ok(self.element.is_enabled().await?)
    }

    async fn text(&self) -> Result<String, BrowserError> {
        Ok(self.element.text().await?)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError> {
        Ok(self.element.attr(name).await?)
    }

    // Portals overlay their buttons; a native click often lands on the overlay.
    async fn click(&self) -> Result<(), BrowserError> {
        let arg = self.element.to_json()?;
        self.driver.execute(SCROLL_AND_CLICK_JS, vec![arg]).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), BrowserError> {
        Ok(self.element.clear().await?)
    }

    async fn send_keys(&self, text: &str) -> Result<(), BrowserError> {
        Ok(self.element.send_keys(text).await?)
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        let found = self.element.find_all(by(locator)).await?;
        Ok(found
            .into_iter()
            .map(|element| WebDriverElement {
                element,
                driver: self.driver.clone(),
            })
            .collect())
    }
}
