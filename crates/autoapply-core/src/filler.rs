//! Generic form filling.
//!
//! Every text field is filled the same way: assign the element's `value`,
//! then dispatch a bubbling `input` event. Controlled inputs in React and Vue
//! only pick up the new value once that event reaches their listeners.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use autoapply_protocols::{BoardSelectors, FieldKind, Page, PageError, Profile, SyntheticEvent};

use crate::registry;

/// Which text fields were filled and which had no matching element.
///
/// Fields without a selector or without a profile value appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    pub filled: Vec<FieldKind>,
    pub missing: Vec<FieldKind>,
}

impl FillReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fold a later attempt's results into this one.
    ///
    /// Fields the retry filled move from `missing` to `filled`.
    pub fn merge(&mut self, retry: FillReport) {
        self.missing.retain(|kind| !retry.filled.contains(kind));
        for kind in retry.filled {
            if !self.filled.contains(&kind) {
                self.filled.push(kind);
            }
        }
    }
}

/// Fill one element, returning whether it was found.
pub async fn fill_field(page: &dyn Page, selector: &str, value: &str) -> Result<bool, PageError> {
    let Some(element) = page.query(selector).await? else {
        return Ok(false);
    };

    page.set_value(&element, value).await?;
    page.dispatch_event(&element, SyntheticEvent::Input).await?;
    Ok(true)
}

/// Fill the text fields `selectors` defines with the profile's values.
///
/// Missing elements are skipped and reported; the first page error aborts.
pub async fn fill_form(
    page: &dyn Page,
    profile: &Profile,
    selectors: &BoardSelectors,
) -> Result<FillReport, PageError> {
    let mut report = FillReport::default();

    for kind in FieldKind::TEXT {
        let (Some(selector), Some(value)) = (selectors.field(kind), profile.value(kind)) else {
            continue;
        };

        if fill_field(page, selector, value).await? {
            report.filled.push(kind);
        } else {
            debug!("No element for {:?} at {}", kind, selector);
            report.missing.push(kind);
        }
    }

    Ok(report)
}

/// Fill the form for a board key such as `"greenhouse"`.
///
/// Returns `false` without touching the page when the key names no supported
/// board, and `false` when a page error interrupts filling. Missing elements
/// do not make this fail.
pub async fn auto_fill_form(page: &dyn Page, profile: &Profile, board_key: &str) -> bool {
    let Some((board, selectors)) = registry::lookup(board_key) else {
        debug!("No selectors for board '{}'", board_key);
        return false;
    };

    match fill_form(page, profile, selectors).await {
        Ok(report) => {
            debug!(
                "Filled {} field(s) on {} ({} missing)",
                report.filled.len(),
                board,
                report.missing.len()
            );
            true
        }
        Err(e) => {
            warn!("Form fill on {} failed: {}", board, e);
            false
        }
    }
}

#[cfg(test)]
#[path = "filler_tests.rs"]
mod tests;
