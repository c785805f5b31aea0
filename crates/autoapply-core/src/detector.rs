//! Board detection from the page location.

use autoapply_protocols::{BoardId, Page, PageError};
use tracing::debug;

/// Classify a hostname by ordered substring checks.
///
/// The first board whose identifier appears in the hostname wins. `None`
/// means the page is not a supported board, which callers treat as "do
/// nothing" rather than as a failure.
pub fn detect_job_board(hostname: &str) -> Option<BoardId> {
    let hostname = hostname.to_ascii_lowercase();
    BoardId::ALL
        .into_iter()
        .find(|board| hostname.contains(board.as_str()))
}

/// Classify a full URL by its host.
pub fn detect_from_url(url: &str) -> Option<BoardId> {
    let parsed = url::Url::parse(url).ok()?;
    detect_job_board(parsed.host_str()?)
}

/// Classify the page a [`Page`] currently shows.
pub async fn detect_page(page: &dyn Page) -> Result<Option<BoardId>, PageError> {
    let hostname = page.hostname().await?;
    let board = detect_job_board(&hostname);
    debug!(
        "Detected board {} for host {}",
        board.map(|b| b.as_str()).unwrap_or("unknown"),
        hostname
    );
    Ok(board)
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
