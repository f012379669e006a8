//! Ordered fallback selectors.
//!
//! Every lookup the form filler does is a `StrategyList`: try each locator
//! in priority order, take the first element that passes the list's
//! requirement (and an optional predicate), and treat any single failure as
//! a miss rather than an error.

use tracing::debug;

use crate::browser::{Element, Locator, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// The element is rendered.
    Visible,
    /// Rendered and enabled: safe to click.
    Actionable,
}

#[derive(Debug, Clone)]
pub struct Strategy {
    pub label: String,
    pub locator: Locator,
}

/// What an acceptance predicate gets to look at.
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub text: String,
    pub aria_label: String,
}

pub type Accept = dyn Fn(&Candidate) -> bool + Send + Sync;

#[derive(Debug, Clone)]
pub struct StrategyList {
    name: &'static str,
    requirement: Requirement,
    strategies: Vec<Strategy>,
}

impl StrategyList {
    pub fn new(name: &'static str, requirement: Requirement) -> Self {
        Self {
            name,
            requirement,
            strategies: Vec::new(),
        }
    }

    pub fn with(mut self, label: impl Into<String>, locator: Locator) -> Self {
        self.strategies.push(Strategy {
            label: label.into(),
            locator,
        });
        self
    }

    /// One strategy per XPath expression, labelled by the expression itself.
    pub fn xpaths(name: &'static str, requirement: Requirement, exprs: &[&str]) -> Self {
        exprs.iter().fold(Self::new(name, requirement), |list, expr| {
            list.with(*expr, Locator::xpath(*expr))
        })
    }

    #[cfg(test)]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub async fn first_match<P: Page>(&self, page: &P) -> Option<P::Element> {
        self.find(page, None).await
    }

    pub async fn first_match_where<P: Page>(&self, page: &P, accept: &Accept) -> Option<P::Element> {
        self.find(page, Some(accept)).await
    }

    async fn find<P: Page>(&self, page: &P, accept: Option<&Accept>) -> Option<P::Element> {
        for strategy in &self.strategies {
            let elements = match page.find_all(&strategy.locator).await {
                Ok(elements) => elements,
                Err(e) => {
                    debug!("{}: strategy '{}' failed: {e}", self.name, strategy.label);
                    continue;
                }
            };
            for element in elements {
                match self.passes(&element, accept).await {
                    Ok(true) => {
                        debug!("{}: matched via '{}'", self.name, strategy.label);
                        return Some(element);
                    }
                    Ok(false) => {}
                    Err(e) => debug!("{}: skipping element from '{}': {e}", self.name, strategy.label),
                }
            }
        }
        debug!("{}: no strategy matched", self.name);
        None
    }

    async fn passes<E: Element>(
        &self,
        element: &E,
        accept: Option<&Accept>,
    ) -> Result<bool, crate::browser::BrowserError> {
        if !element.is_displayed().await? {
            return Ok(false);
        }
        if self.requirement == Requirement::Actionable && !element.is_enabled().await? {
            return Ok(false);
        }
        match accept {
            None => Ok(true),
            Some(accept) => {
                let candidate = Candidate {
                    text: element.text().await?,
                    aria_label: element.attr("aria-label").await?.unwrap_or_default(),
                };
                Ok(accept(&candidate))
            }
        }
    }
}

const EASY_APPLY_XPATHS: [&str; 7] = [
    r#"//button[contains(.,"Easy Apply")]"#,
    r#"//button[contains(@aria-label,"Easy Apply")]"#,
    r#"//button[contains(@class,"jobs-apply-button")]"#,
    r#"//button[contains(.,"easy apply")]"#,
    r#"//button[contains(.,"Easy apply")]"#,
    r#"//div[contains(@class,"jobs-apply")]//button"#,
    r#"//button[@data-job-id]"#,
];

/// The in-page "Easy Apply" trigger, including class-name fallbacks.
pub fn easy_apply_buttons() -> StrategyList {
    let mut list = StrategyList::xpaths("easy-apply", Requirement::Actionable, &EASY_APPLY_XPATHS[..5]);
    list = list
        .with(".jobs-apply-button", Locator::css(".jobs-apply-button"))
        .with(
            "inapply control",
            Locator::css(r#"[data-control-name="jobdetails_topcard_inapply"]"#),
        );
    EASY_APPLY_XPATHS[5..]
        .iter()
        .fold(list, |list, expr| list.with(*expr, Locator::xpath(*expr)))
}

/// Accepts a button that reads like an apply control.
pub fn looks_like_easy_apply(candidate: &Candidate) -> bool {
    let text = candidate.text.to_lowercase();
    let aria = candidate.aria_label.to_lowercase();
    text.contains("easy") || aria.contains("easy") || text.contains("apply")
}

/// Markers that the application modal has opened.
pub fn modal_markers() -> StrategyList {
    StrategyList::xpaths(
        "modal",
        Requirement::Visible,
        &[
            r#"//div[contains(@class,"jobs-easy-apply-modal")]"#,
            r#"//div[contains(@class,"easy-apply-modal")]"#,
            r#"//h2[contains(.,"Apply to")]"#,
            r#"//h2[contains(.,"Easy Apply")]"#,
            r#"//button[contains(@aria-label,"Submit application")]"#,
            r#"//button[contains(@aria-label,"Review your application")]"#,
        ],
    )
}

pub fn phone_inputs() -> StrategyList {
    StrategyList::xpaths(
        "phone",
        Requirement::Visible,
        &[
            r#"//input[contains(@id,"phoneNumber")]"#,
            r#"//input[contains(@name,"phoneNumber")]"#,
            r#"//input[@name="phone"]"#,
            r#"//input[contains(@placeholder,"Phone")]"#,
            r#"//input[contains(@placeholder,"phone")]"#,
        ],
    )
}

pub fn submit_buttons() -> StrategyList {
    StrategyList::xpaths(
        "submit",
        Requirement::Actionable,
        &[
            r#"//button[contains(@aria-label,"Submit application")]"#,
            r#"//button[contains(.,"Submit application")]"#,
            r#"//button[contains(.,"Submit")]"#,
        ],
    )
}

pub const ADVANCE_LABELS: [&str; 4] = ["Next", "Review", "Continue to next step", "Continue"];

/// Next / Review / Continue, each matched by aria-label or text.
pub fn advance_buttons() -> StrategyList {
    ADVANCE_LABELS.iter().fold(
        StrategyList::new("advance", Requirement::Actionable),
        |list, label| list.with(*label, Locator::xpath(advance_xpath(label))),
    )
}

pub fn advance_xpath(label: &str) -> String {
    format!(r#"//button[contains(@aria-label,"{label}")] | //button[contains(.,"{label}")]"#)
}

/// Radio input for `answer` inside a fieldset, by label, sibling text or value.
pub fn radio_xpath(answer: &str) -> String {
    format!(
        r#".//label[contains(.,"{answer}")]/..//input[@type="radio"] | .//input[@type="radio"][following-sibling::*[contains(.,"{answer}")]] | .//input[@type="radio"][@value="{answer}"]"#
    )
}

pub const FILE_INPUT_XPATH: &str = r#"//input[@type="file"]"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakePage;

    #[test]
    fn test_easy_apply_strategy_order() {
        let labels: Vec<String> = easy_apply_buttons()
            .strategies()
            .iter()
            .map(|s| s.label.clone())
            .collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], r#"//button[contains(.,"Easy Apply")]"#);
        assert_eq!(labels[5], ".jobs-apply-button");
        assert_eq!(labels[8], r#"//button[@data-job-id]"#);
    }

    #[test]
    fn test_looks_like_easy_apply() {
        let c = |text: &str, aria: &str| Candidate {
            text: text.to_string(),
            aria_label: aria.to_string(),
        };
        assert!(looks_like_easy_apply(&c("Easy Apply", "")));
        assert!(looks_like_easy_apply(&c("", "Easy Apply to Backend Engineer")));
        assert!(looks_like_easy_apply(&c("Apply now", "")));
        assert!(!looks_like_easy_apply(&c("Save", "Save job")));
    }

    #[tokio::test]
    async fn test_first_visible_enabled_match_wins() {
        let page = FakePage::new();
        let list = StrategyList::new("test", Requirement::Actionable)
            .with("a", Locator::css("#a"))
            .with("b", Locator::css("#b"))
            .with("c", Locator::css("#c"));
        page.register(Locator::css("#a"), &page.element("hidden-a").hidden());
        page.register(Locator::css("#b"), &page.element("disabled-b").disabled());
        page.register(Locator::css("#c"), &page.element("good-c"));

        let found = list.first_match(&page).await.unwrap();
        found.click().await.unwrap();
        assert_eq!(page.events(), vec!["click good-c"]);
    }

    #[tokio::test]
    async fn test_failing_element_is_skipped() {
        let page = FakePage::new();
        let list = StrategyList::new("test", Requirement::Visible)
            .with("a", Locator::css("#a"))
            .with("b", Locator::css("#b"));
        page.register(Locator::css("#a"), &page.element("stale").broken());
        page.register(Locator::css("#b"), &page.element("fresh"));

        let found = list.first_match(&page).await.unwrap();
        found.click().await.unwrap();
        assert_eq!(page.events(), vec!["click fresh"]);
    }

    #[tokio::test]
    async fn test_predicate_filters_candidates() {
        let page = FakePage::new();
        let locator = Locator::xpath(r#"//button[@data-job-id]"#);
        page.register(locator.clone(), &page.element("save").with_text("Save"));
        page.register(locator.clone(), &page.element("apply").with_text("Easy Apply"));
        let list = StrategyList::new("test", Requirement::Actionable).with("job-id", locator);

        let found = list
            .first_match_where(&page, &looks_like_easy_apply)
            .await
            .unwrap();
        found.click().await.unwrap();
        assert_eq!(page.events(), vec!["click apply"]);
    }

    #[tokio::test]
    async fn test_no_match_is_none() {
        let page = FakePage::new();
        assert!(submit_buttons().first_match(&page).await.is_none());
    }

    #[test]
    fn test_radio_xpath_embeds_answer() {
        let xpath = radio_xpath("No");
        assert!(xpath.starts_with(r#".//label[contains(.,"No")]"#));
        assert!(xpath.ends_with(r#"[@value="No"]"#));
    }
}
