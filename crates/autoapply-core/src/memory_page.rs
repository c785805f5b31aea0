//! In-memory [`Page`] backed by parsed HTML.
//!
//! The document is a list of HTML fragments appended to `<body>`. Selector
//! queries run against the parsed document with real CSS matching, and
//! elements are identified by their position in document order, which stays
//! stable because fragments are only ever appended. Writes (values, events,
//! clicks, files) are kept per element beside the markup.
//!
//! Elements carrying a `data-click-fails` attribute reject direct clicks,
//! mimicking frameworks that override native click behavior. Elements with
//! `data-value-fails` reject value assignment the way a detached or
//! script-guarded input does.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use scraper::{ElementRef, Html, Selector};
use tokio::sync::watch;
use tracing::trace;

use autoapply_protocols::{ElementHandle, MutationSignal, Page, PageError, SyntheticEvent};

#[derive(Debug, Clone, Default)]
struct ElementState {
    value: Option<String>,
    files: Vec<PathBuf>,
    events: Vec<&'static str>,
    direct_clicks: usize,
}

#[derive(Debug, Default)]
struct MemoryDom {
    fragments: Vec<String>,
    elements: HashMap<usize, ElementState>,
    interactions: usize,
}

/// What the write operations need to know about a located element.
#[derive(Debug)]
struct ElementInfo {
    ordinal: usize,
    tag: String,
    input_type: Option<String>,
    value_attr: Option<String>,
    click_fails: bool,
    value_fails: bool,
}

impl ElementInfo {
    fn from_element(ordinal: usize, element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            ordinal,
            tag: value.name().to_string(),
            input_type: value.attr("type").map(|t| t.to_ascii_lowercase()),
            value_attr: value.attr("value").map(String::from),
            click_fails: value.attr("data-click-fails").is_some(),
            value_fails: value.attr("data-value-fails").is_some(),
        }
    }

    fn is_file_input(&self) -> bool {
        self.tag == "input" && self.input_type.as_deref() == Some("file")
    }
}

/// A job-board document held in memory.
pub struct MemoryPage {
    hostname: String,
    dom: Mutex<MemoryDom>,
    mutations: watch::Sender<u64>,
}

impl MemoryPage {
    /// An empty document at `hostname`.
    pub fn new(hostname: impl Into<String>) -> Self {
        let (mutations, _) = watch::channel(0);
        Self {
            hostname: hostname.into(),
            dom: Mutex::new(MemoryDom::default()),
            mutations,
        }
    }

    /// A document at `hostname` whose body holds `html`.
    pub fn with_html(hostname: impl Into<String>, html: &str) -> Self {
        let page = Self::new(hostname);
        page.dom.lock().fragments.push(html.to_string());
        page
    }

    /// Append markup to the body and notify mutation subscribers.
    pub fn append_html(&self, fragment: &str) {
        self.dom.lock().fragments.push(fragment.to_string());
        self.mutations.send_modify(|n| *n += 1);
        trace!("Appended {} bytes to memory page", fragment.len());
    }

    /// Current value of the first element matching `selector`.
    ///
    /// Falls back to the markup's `value` attribute when nothing was assigned.
    pub fn value(&self, selector: &str) -> Option<String> {
        let info = self.locate(selector).ok()??;
        let dom = self.dom.lock();
        dom.elements
            .get(&info.ordinal)
            .and_then(|state| state.value.clone())
            .or(info.value_attr)
    }

    /// Event types dispatched on the first element matching `selector`.
    pub fn events(&self, selector: &str) -> Vec<&'static str> {
        self.state(selector).map(|s| s.events).unwrap_or_default()
    }

    /// Clicks received by the first element matching `selector`, counting
    /// both native clicks and synthetic click events.
    pub fn click_count(&self, selector: &str) -> usize {
        self.state(selector)
            .map(|s| s.direct_clicks + s.events.iter().filter(|e| **e == "click").count())
            .unwrap_or(0)
    }

    /// Native `click()` calls received by the first element matching `selector`.
    pub fn direct_click_count(&self, selector: &str) -> usize {
        self.state(selector).map(|s| s.direct_clicks).unwrap_or(0)
    }

    /// Files attached to the first element matching `selector`.
    pub fn files(&self, selector: &str) -> Vec<PathBuf> {
        self.state(selector).map(|s| s.files).unwrap_or_default()
    }

    /// Number of writes (values, events, clicks, files) the page has received.
    pub fn interaction_count(&self) -> usize {
        self.dom.lock().interactions
    }

    fn state(&self, selector: &str) -> Option<ElementState> {
        let info = self.locate(selector).ok()??;
        self.dom.lock().elements.get(&info.ordinal).cloned()
    }

    fn render(&self) -> String {
        let dom = self.dom.lock();
        format!(
            "<!DOCTYPE html><html><head></head><body>{}</body></html>",
            dom.fragments.concat()
        )
    }

    fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
        document.root_element().descendants().filter_map(ElementRef::wrap)
    }

    fn locate(&self, selector: &str) -> Result<Option<ElementInfo>, PageError> {
        let parsed = Selector::parse(selector)
            .map_err(|e| PageError::InvalidSelector(format!("{} ({:?})", selector, e)))?;
        let document = Html::parse_document(&self.render());

        let Some(found) = document.select(&parsed).next() else {
            return Ok(None);
        };

        Ok(Self::elements(&document)
            .position(|el| el.id() == found.id())
            .map(|ordinal| ElementInfo::from_element(ordinal, found)))
    }

    fn describe(&self, element: &ElementHandle) -> Result<ElementInfo, PageError> {
        let detached = || PageError::Detached(element.selector().to_string());
        let ordinal: usize = element.id().parse().map_err(|_| detached())?;
        let document = Html::parse_document(&self.render());

        Self::elements(&document)
            .nth(ordinal)
            .map(|el| ElementInfo::from_element(ordinal, el))
            .ok_or_else(detached)
    }

    fn write<F>(&self, ordinal: usize, apply: F)
    where
        F: FnOnce(&mut ElementState),
    {
        let mut dom = self.dom.lock();
        apply(dom.elements.entry(ordinal).or_default());
        dom.interactions += 1;
    }
}

#[async_trait]
impl Page for MemoryPage {
    async fn hostname(&self) -> Result<String, PageError> {
        Ok(self.hostname.clone())
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>, PageError> {
        Ok(self
            .locate(selector)?
            .map(|info| ElementHandle::new(info.ordinal.to_string(), selector)))
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError> {
        let info = self.describe(element)?;
        if info.value_fails {
            return Err(PageError::Script(format!(
                "value assignment on {} was rejected",
                element.selector()
            )));
        }
        self.write(info.ordinal, |state| state.value = Some(value.to_string()));
        Ok(())
    }

    async fn dispatch_event(
        &self,
        element: &ElementHandle,
        event: SyntheticEvent,
    ) -> Result<(), PageError> {
        let info = self.describe(element)?;
        self.write(info.ordinal, |state| state.events.push(event.event_type()));
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        let info = self.describe(element)?;
        if info.click_fails {
            return Err(PageError::Script(format!(
                "click() on {} was intercepted",
                element.selector()
            )));
        }
        self.write(info.ordinal, |state| state.direct_clicks += 1);
        Ok(())
    }

    async fn set_files(&self, element: &ElementHandle, files: &[PathBuf]) -> Result<(), PageError> {
        let info = self.describe(element)?;
        if !info.is_file_input() {
            return Err(PageError::Unsupported(format!(
                "{} is not a file input",
                element.selector()
            )));
        }
        self.write(info.ordinal, |state| state.files = files.to_vec());
        Ok(())
    }

    fn mutations(&self) -> MutationSignal {
        self.mutations.subscribe()
    }
}

#[cfg(test)]
#[path = "memory_page_tests.rs"]
mod tests;
