//! Auto-apply pipeline errors.

use thiserror::Error;

use super::PageError;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("Adapter '{adapter}' failed: {message}")]
    Adapter { adapter: String, message: String },

    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

impl ApplyError {
    pub fn adapter(adapter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            adapter: adapter.into(),
            message: message.into(),
        }
    }
}
