//! [`Page`] over a CDP session.
//!
//! Elements are remote objects: a query evaluates `document.querySelector`
//! and keeps the resulting object id as the element handle. Writes run small
//! functions with `this` bound to that object.
//!
//! Mutations are observed in the page itself. A `MutationObserver` on
//! `document.documentElement` (child list, whole subtree) calls a CDP
//! binding, and every resulting `Runtime.bindingCalled` event bumps the
//! page's mutation signal. The observer is reinstalled after each load.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use autoapply_protocols::{ElementHandle, MutationSignal, Page, PageError, SyntheticEvent};

use crate::error::CdpError;
use crate::protocol::{BindingCalled, CdpResponse};
use crate::session::PageSession;

pub(crate) const MUTATION_BINDING: &str = "__autoapplyMutation";

const OBSERVER_SCRIPT: &str = r#"(() => {
    if (window.__autoapplyObserver || !document.documentElement) return false;
    const notify = () => { if (window.__autoapplyMutation) window.__autoapplyMutation(""); };
    window.__autoapplyObserver = new MutationObserver(notify);
    window.__autoapplyObserver.observe(document.documentElement, { childList: true, subtree: true });
    return true;
})()"#;

const SET_VALUE: &str = "function(value) { this.value = value; }";

const DISPATCH_EVENT: &str = r#"function(type, mouse) {
    const init = { bubbles: true, cancelable: true };
    const event = mouse ? new MouseEvent(type, { ...init, view: window }) : new Event(type, init);
    this.dispatchEvent(event);
}"#;

const CLICK: &str = "function() { this.click(); }";

fn query_expression(selector: &str) -> Result<String, PageError> {
    let literal = serde_json::to_string(selector).map_err(|e| PageError::InvalidSelector(e.to_string()))?;
    Ok(format!("document.querySelector({})", literal))
}

/// What an event means for the mutation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageEvent {
    Mutation,
    /// A new document loaded; the observer must be reinstalled.
    Loaded,
    Other,
}

fn classify(event: &CdpResponse) -> PageEvent {
    match event.method.as_deref() {
        Some("Runtime.bindingCalled") => {
            let binding = event
                .params
                .clone()
                .and_then(|p| serde_json::from_value::<BindingCalled>(p).ok());
            match binding {
                Some(b) if b.name == MUTATION_BINDING => PageEvent::Mutation,
                _ => PageEvent::Other,
            }
        }
        Some("DOM.documentUpdated") => PageEvent::Mutation,
        Some("Page.loadEventFired") => PageEvent::Loaded,
        _ => PageEvent::Other,
    }
}

/// A Chrome tab seen through the engine's page seam.
pub struct CdpPage {
    session: Arc<PageSession>,
    mutations: MutationSignal,
    listener: tokio::task::JoinHandle<()>,
}

impl CdpPage {
    /// Install the mutation observer and start listening for its events.
    pub async fn attach(session: PageSession) -> Result<Self, CdpError> {
        let events = session
            .take_events()
            .ok_or_else(|| CdpError::InvalidResponse("session events already taken".to_string()))?;
        let session = Arc::new(session);

        let (tx, mutations) = watch::channel(0u64);
        let listener = tokio::spawn(Self::listen(Arc::clone(&session), events, tx));

        session.add_binding(MUTATION_BINDING).await?;
        let installed = session.evaluate(OBSERVER_SCRIPT).await?;
        debug!(
            "Attached to tab {} (observer installed: {})",
            session.target_id(),
            installed.as_bool().unwrap_or(false)
        );

        Ok(Self {
            session,
            mutations,
            listener,
        })
    }

    async fn listen(
        session: Arc<PageSession>,
        mut events: mpsc::UnboundedReceiver<CdpResponse>,
        mutations: watch::Sender<u64>,
    ) {
        while let Some(event) = events.recv().await {
            match classify(&event) {
                PageEvent::Mutation => {
                    trace!("DOM mutation on {}", session.target_id());
                    mutations.send_modify(|n| *n = n.wrapping_add(1));
                }
                PageEvent::Loaded => {
                    if let Err(e) = session.evaluate(OBSERVER_SCRIPT).await {
                        debug!("Could not reinstall mutation observer: {}", e);
                    }
                    mutations.send_modify(|n| *n = n.wrapping_add(1));
                }
                PageEvent::Other => {}
            }
        }
    }
}

impl Drop for CdpPage {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[async_trait]
impl Page for CdpPage {
    async fn hostname(&self) -> Result<String, PageError> {
        let hostname = self.session.evaluate("window.location.hostname").await?;
        hostname
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| PageError::Script("location.hostname is not a string".to_string()))
    }

    async fn query(&self, selector: &str) -> Result<Option<ElementHandle>, PageError> {
        let expression = query_expression(selector)?;
        let object = match self.session.evaluate_handle(&expression).await {
            Ok(object) => object,
            Err(CdpError::JavaScript(message)) => return Err(PageError::InvalidSelector(message)),
            Err(e) => return Err(e.into()),
        };

        if object.is_null() {
            return Ok(None);
        }
        Ok(object
            .object_id
            .map(|id| ElementHandle::new(id, selector)))
    }

    async fn set_value(&self, element: &ElementHandle, value: &str) -> Result<(), PageError> {
        self.session
            .call_function_on(element.id(), SET_VALUE, &[json!(value)])
            .await?;
        Ok(())
    }

    async fn dispatch_event(
        &self,
        element: &ElementHandle,
        event: SyntheticEvent,
    ) -> Result<(), PageError> {
        self.session
            .call_function_on(
                element.id(),
                DISPATCH_EVENT,
                &[json!(event.event_type()), json!(event.is_mouse_event())],
            )
            .await?;
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.session.call_function_on(element.id(), CLICK, &[]).await?;
        Ok(())
    }

    async fn set_files(&self, element: &ElementHandle, files: &[PathBuf]) -> Result<(), PageError> {
        self.session.set_file_input_files(element.id(), files).await?;
        Ok(())
    }

    fn mutations(&self) -> MutationSignal {
        self.mutations.clone()
    }
}
