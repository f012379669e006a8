use std::time::Duration;

use tracing::{info, warn};

use crate::browser::{BrowserError, Element, Locator, Page};

pub const LOGIN_URL: &str = "https://www.linkedin.com/login";
const SUBMIT_XPATH: &str = r#"//button[@type="submit"]"#;

/// Signs in on the LinkedIn login page. A failed login is only a warning:
/// the session may already be authenticated, and the job page will tell.
pub async fn login<P: Page>(page: &P, email: &str, password: &str, settle: Duration) -> bool {
    match try_login(page, email, password, settle).await {
        Ok(()) => {
            info!("LinkedIn: logged in");
            true
        }
        Err(e) => {
            warn!("LinkedIn login issue: {e}");
            false
        }
    }
}

async fn try_login<P: Page>(
    page: &P,
    email: &str,
    password: &str,
    settle: Duration,
) -> Result<(), BrowserError> {
    page.goto(LOGIN_URL).await?;
    tokio::time::sleep(settle).await;
    first(page, &Locator::id("username")).await?.send_keys(email).await?;
    first(page, &Locator::id("password")).await?.send_keys(password).await?;
    first(page, &Locator::xpath(SUBMIT_XPATH)).await?.click().await?;
    tokio::time::sleep(settle).await;
    Ok(())
}

async fn first<P: Page>(page: &P, locator: &Locator) -> Result<P::Element, BrowserError> {
    page.find_all(locator)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BrowserError::Command(format!("no element for {locator}")))
}
