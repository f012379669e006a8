//! In-memory page for exercising the apply heuristic without a browser.
//!
//! Elements are registered against the exact `Locator` the heuristic will
//! query. Every click on the page bumps a shared counter; an element can be
//! made visible only within a window of that counter, which is enough to
//! script "modal opens after the button click" or "Submit shows up on the
//! second step".

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{BrowserError, Element, Locator, Page};

#[derive(Default)]
struct Shared {
    clicks: usize,
    events: Vec<String>,
}

#[derive(Default)]
struct Node {
    name: String,
    text: String,
    attrs: HashMap<String, String>,
    hidden: bool,
    disabled: bool,
    broken: bool,
    visible_from: usize,
    visible_until: Option<usize>,
    value: String,
    children: HashMap<Locator, Vec<FakeElement>>,
}

#[derive(Clone)]
pub struct FakeElement {
    node: Arc<Mutex<Node>>,
    shared: Arc<Mutex<Shared>>,
}

#[derive(Default)]
pub struct FakePage {
    shared: Arc<Mutex<Shared>>,
    elements: Mutex<HashMap<Locator, Vec<FakeElement>>>,
    goto_error: Option<String>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new, unregistered element named `name` in event logs.
    pub fn element(&self, name: &str) -> FakeElement {
        FakeElement {
            node: Arc::new(Mutex::new(Node {
                name: name.to_string(),
                ..Default::default()
            })),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Every navigation fails with `message`, as a crashed session would.
    pub fn fail_goto(mut self, message: &str) -> Self {
        self.goto_error = Some(message.to_string());
        self
    }

    pub fn register(&self, locator: Locator, element: &FakeElement) {
        self.elements
            .lock()
            .unwrap()
            .entry(locator)
            .or_default()
            .push(element.clone());
    }

    pub fn events(&self) -> Vec<String> {
        self.shared.lock().unwrap().events.clone()
    }

    pub fn clicks(&self) -> usize {
        self.shared.lock().unwrap().clicks
    }

    fn all_elements(&self) -> Vec<FakeElement> {
        self.elements
            .lock()
            .unwrap()
            .values()
            .flatten()
            .cloned()
            .collect()
    }
}

impl FakeElement {
    pub fn with_text(self, text: &str) -> Self {
        self.node.lock().unwrap().text = text.to_string();
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.node
            .lock()
            .unwrap()
            .attrs
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn hidden(self) -> Self {
        self.node.lock().unwrap().hidden = true;
        self
    }

    pub fn disabled(self) -> Self {
        self.node.lock().unwrap().disabled = true;
        self
    }

    /// Every call on this element fails, as a stale element would.
    pub fn broken(self) -> Self {
        self.node.lock().unwrap().broken = true;
        self
    }

    /// Displayed only while the page click counter is in `from..until`.
    pub fn visible_between(self, from: usize, until: Option<usize>) -> Self {
        {
            let mut node = self.node.lock().unwrap();
            node.visible_from = from;
            node.visible_until = until;
        }
        self
    }

    pub fn child(self, locator: Locator, child: &FakeElement) -> Self {
        self.node
            .lock()
            .unwrap()
            .children
            .entry(locator)
            .or_default()
            .push(child.clone());
        self
    }

    pub fn value(&self) -> String {
        self.node.lock().unwrap().value.clone()
    }

    fn check(&self) -> Result<(), BrowserError> {
        let node = self.node.lock().unwrap();
        if node.broken {
            return Err(BrowserError::Command(format!(
                "stale element reference: {}",
                node.name
            )));
        }
        Ok(())
    }

    fn log(&self, event: String) {
        self.shared.lock().unwrap().events.push(event);
    }

    fn name(&self) -> String {
        self.node.lock().unwrap().name.clone()
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn is_displayed(&self) -> Result<bool, BrowserError> {
        self.check()?;
        let clicks = self.shared.lock().unwrap().clicks;
        let node = self.node.lock().unwrap();
        Ok(!node.hidden
            && clicks >= node.visible_from
            && node.visible_until.map_or(true, |until| clicks < until))
    }

    async fn is_enabled(&self) -> Result<bool, BrowserError> {
        self.check()?;
        Ok(!self.node.lock().unwrap().disabled)
    }

    async fn text(&self) -> Result<String, BrowserError> {
        self.check()?;
        Ok(self.node.lock().unwrap().text.clone())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, BrowserError> {
        self.check()?;
        Ok(self.node.lock().unwrap().attrs.get(name).cloned())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        self.check()?;
        let event = format!("click {}", self.name());
        let mut shared = self.shared.lock().unwrap();
        shared.clicks += 1;
        shared.events.push(event);
        Ok(())
    }

    async fn clear(&self) -> Result<(), BrowserError> {
        self.check()?;
        self.node.lock().unwrap().value.clear();
        self.log(format!("clear {}", self.name()));
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<(), BrowserError> {
        self.check()?;
        self.node.lock().unwrap().value.push_str(text);
        self.log(format!("type {} {text}", self.name()));
        Ok(())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>, BrowserError> {
        self.check()?;
        Ok(self
            .node
            .lock()
            .unwrap()
            .children
            .get(locator)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl Page for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.shared.lock().unwrap().events.push(format!("goto {url}"));
        match &self.goto_error {
            Some(message) => Err(BrowserError::Command(message.clone())),
            None => Ok(()),
        }
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<FakeElement>, BrowserError> {
        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(locator)
            .cloned()
            .unwrap_or_default())
    }

    async fn click_button_with_text(&self, needle: &str) -> Result<bool, BrowserError> {
        let needle = needle.to_lowercase();
        for element in self.all_elements() {
            let matches = {
                let node = element.node.lock().unwrap();
                node.attrs.get("tag").map(String::as_str) == Some("button")
                    && (node.text.to_lowercase().contains(&needle)
                        || node
                            .attrs
                            .get("aria-label")
                            .is_some_and(|a| a.to_lowercase().contains(&needle)))
            };
            if matches {
                element.click().await?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn hide_automation(&self) -> Result<(), BrowserError> {
        self.shared
            .lock()
            .unwrap()
            .events
            .push("hide automation".to_string());
        Ok(())
    }
}
