//! Clicking the apply button.

use std::time::Duration;

use tracing::{debug, warn};

use autoapply_protocols::{BoardSelectors, ElementHandle, Page, PageError, SyntheticEvent};

use crate::waiter::wait_for_selector;

/// Bound for the apply-button wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// How a click reached the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPath {
    /// The element's native `click()`.
    Direct,
    /// A dispatched bubbling `MouseEvent("click")`.
    Synthetic,
}

/// Click `element`, dispatching a synthetic click when the native one fails.
pub async fn click_element(page: &dyn Page, element: &ElementHandle) -> Result<ClickPath, PageError> {
    match page.click(element).await {
        Ok(()) => Ok(ClickPath::Direct),
        Err(e) => {
            debug!("Direct click on {} failed ({}), dispatching click event", element.selector(), e);
            page.dispatch_event(element, SyntheticEvent::Click).await?;
            Ok(ClickPath::Synthetic)
        }
    }
}

/// Find the board's apply button, waiting up to `timeout`, and click it.
pub async fn click_apply_if_possible(
    page: &dyn Page,
    selectors: &BoardSelectors,
    timeout: Duration,
) -> bool {
    let selector = selectors.apply_button;
    if selector.is_empty() {
        return false;
    }

    let Some(button) = wait_for_selector(page, selector, timeout).await else {
        debug!("Apply button {} not found", selector);
        return false;
    };

    match click_element(page, &button).await {
        Ok(path) => {
            debug!("Clicked apply button {} ({:?})", selector, path);
            true
        }
        Err(e) => {
            warn!("Could not click apply button {}: {}", selector, e);
            false
        }
    }
}
