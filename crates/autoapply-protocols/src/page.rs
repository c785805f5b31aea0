//! The page seam.
//!
//! The engine never touches a browser directly. Everything it needs from a
//! job-board document goes through [`Page`]: hostname lookup, selector
//! queries, value assignment, synthetic events, clicks, file attachment, and a
//! mutation signal for waiting on dynamically injected elements.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::PageError;

/// Receiver side of a page's mutation counter.
///
/// The value increases every time the document's element tree changes; only
/// the change notification matters, not the number itself.
pub type MutationSignal = watch::Receiver<u64>;

/// Opaque reference to an element found by a selector query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    id: String,
    selector: String,
}

impl ElementHandle {
    pub fn new(id: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
        }
    }

    /// Backend-specific element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The selector that located this element.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

/// Events dispatched to notify framework listeners.
///
/// Controlled inputs in React and Vue ignore a raw `value` assignment; they
/// only observe the change once an `input` event bubbles through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticEvent {
    Input,
    Click,
}

impl SyntheticEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            SyntheticEvent::Input => "input",
            SyntheticEvent::Click => "click",
        }
    }

    /// Whether the event is constructed as a `MouseEvent` rather than a plain `Event`.
    pub fn is_mouse_event(&self) -> bool {
        matches!(self, SyntheticEvent::Click)
    }

    pub fn bubbles(&self) -> bool {
        true
    }
}

/// A job-board document the engine can read and manipulate.
#[async_trait]
pub trait Page: Send + Sync {
    /// Hostname of the document's location.
    async fn hostname(&self) -> Result<String, PageError>;

    /// First element matching `selector`, if any.
    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>, PageError>;

    /// Assign the element's `value` property directly.
    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError>;

    /// Dispatch a synthetic, bubbling event on the element.
    async fn dispatch_event(
        &self,
        element: &ElementHandle,
        event: SyntheticEvent,
    ) -> Result<(), PageError>;

    /// Invoke the element's native `click()`.
    async fn click(&self, element: &ElementHandle) -> Result<(), PageError>;

    /// Attach local files to a file input.
    async fn set_files(&self, element: &ElementHandle, files: &[PathBuf]) -> Result<(), PageError>;

    /// Subscribe to document mutations.
    fn mutations(&self) -> MutationSignal;
}
