//! Page backend errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Element no longer attached: {0}")]
    Detached(String),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Unsupported page operation: {0}")]
    Unsupported(String),

    #[error("Page backend error: {0}")]
    Backend(String),
}
