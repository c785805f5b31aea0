//! Waiting for dynamically injected elements.
//!
//! Job boards built as single-page apps render their forms after the initial
//! load. [`wait_for`] turns "an element may appear at some point" into one
//! awaitable value with a bounded wait: it probes once, then re-probes after
//! every document mutation until the probe succeeds or the timeout elapses.

use std::future::Future;
use std::time::Duration;

use autoapply_protocols::{ElementHandle, MutationSignal, Page};
use tracing::{debug, trace};

/// Bound for generic element waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Wait until `probe` yields a value, re-checking on each mutation.
///
/// Resolves `None` once `timeout` elapses. The signal is marked seen before
/// the first probe, so a mutation landing between the probe and the wait
/// still triggers a re-check.
pub async fn wait_for<T, F, Fut>(mut signal: MutationSignal, timeout: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    signal.borrow_and_update();

    if let Some(found) = probe().await {
        return Some(found);
    }

    let observe = async {
        loop {
            if signal.changed().await.is_err() {
                // Publisher dropped; no mutation can arrive, only the timeout.
                std::future::pending::<()>().await;
            }
            trace!("Mutation observed, re-probing");
            if let Some(found) = probe().await {
                return found;
            }
        }
    };

    tokio::time::timeout(timeout, observe).await.ok()
}

/// Wait for `selector` to match an element.
///
/// A failed query counts as "not found" for that probe.
pub async fn wait_for_selector(
    page: &dyn Page,
    selector: &str,
    timeout: Duration,
) -> Option<ElementHandle> {
    let found = wait_for(page.mutations(), timeout, move || async move {
        match page.query(selector).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Query for {} failed while waiting: {}", selector, e);
                None
            }
        }
    })
    .await;

    if found.is_none() {
        debug!("Gave up waiting for {} after {:?}", selector, timeout);
    }
    found
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
