//! Resume and cover-letter attachment.
//!
//! A profile document is attached only when its value names an existing local
//! file and the board defines a selector for it. URLs and pasted text cannot
//! be handed to a file input and are skipped with a reason.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use autoapply_protocols::{AdapterOutcome, BoardSelectors, FieldKind, Page, Profile};

#[derive(Debug, Serialize)]
struct Skipped {
    field: FieldKind,
    reason: &'static str,
}

#[derive(Debug, Serialize)]
struct Failed {
    field: FieldKind,
    error: String,
}

async fn local_file(value: &str) -> Option<PathBuf> {
    if value.contains("://") {
        return None;
    }
    let metadata = tokio::fs::metadata(value).await.ok()?;
    metadata.is_file().then(|| PathBuf::from(value))
}

/// Attach the profile's documents to the board's file inputs.
///
/// Succeeds when no attachment failed; skipped documents do not count as
/// failures.
pub async fn handle_file_uploads(
    page: &dyn Page,
    profile: &Profile,
    selectors: &BoardSelectors,
) -> AdapterOutcome {
    let mut attached = Vec::new();
    let mut skipped = Vec::new();
    let mut failed = Vec::new();

    for field in FieldKind::FILES {
        let Some(value) = profile.value(field) else {
            continue;
        };
        let Some(selector) = selectors.field(field) else {
            skipped.push(Skipped { field, reason: "board has no selector" });
            continue;
        };
        let Some(path) = local_file(value).await else {
            skipped.push(Skipped { field, reason: "not a local file" });
            continue;
        };

        let element = match page.query(selector).await {
            Ok(Some(element)) => element,
            Ok(None) => {
                skipped.push(Skipped { field, reason: "file input not found" });
                continue;
            }
            Err(e) => {
                failed.push(Failed { field, error: e.to_string() });
                continue;
            }
        };

        match page.set_files(&element, std::slice::from_ref(&path)).await {
            Ok(()) => attached.push(field),
            Err(e) => failed.push(Failed { field, error: e.to_string() }),
        }
    }

    debug!(
        "File upload: {} attached, {} skipped, {} failed",
        attached.len(),
        skipped.len(),
        failed.len()
    );

    let outcome = if failed.is_empty() {
        AdapterOutcome::success()
    } else {
        AdapterOutcome::failure()
    };
    outcome.with_details(json!({
        "attached": attached,
        "skipped": skipped,
        "failed": failed,
    }))
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
