//! Runtime message contract between a caller (popup, CLI, HTTP client) and the engine.

use serde::{Deserialize, Serialize};

use crate::board::FieldKind;
use crate::profile::Profile;

/// A request delivered to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RuntimeMessage {
    /// Fill the current page's application form and click apply.
    #[serde(rename = "AUTO_APPLY")]
    AutoApply {
        #[serde(default)]
        profile: Profile,
    },
}

impl RuntimeMessage {
    pub fn auto_apply(profile: Profile) -> Self {
        Self::AutoApply { profile }
    }
}

/// Top-level outcome of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyStatus {
    Success,
    Error,
}

/// Outcome of one adapter capability (fill, upload or click).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AdapterOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            details: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Diagnostics accumulated while a pipeline runs.
///
/// Stages only ever add to this; nothing is rolled back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyDetails {
    /// Name of the adapter that handled the board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter_result: Option<AdapterOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter_error: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fallback_used: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filled_fields: Vec<FieldKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<FieldKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_result: Option<AdapterOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicked_apply: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapter_click_error: Option<String>,
    /// Number of fill/upload/click passes that ran.
    #[serde(default)]
    pub passes: u32,
}

/// Response sent back for a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoApplyResponse {
    pub status: ApplyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ApplyDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AutoApplyResponse {
    pub fn success(job_board: impl Into<String>, details: ApplyDetails) -> Self {
        Self {
            status: ApplyStatus::Success,
            job_board: Some(job_board.into()),
            details: Some(details),
            message: None,
        }
    }

    /// An error meant for direct display, with no pipeline diagnostics.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApplyStatus::Error,
            job_board: None,
            details: None,
            message: Some(message.into()),
        }
    }

    /// A pipeline that ran but did not fill the form.
    pub fn failed(job_board: impl Into<String>, message: impl Into<String>, details: ApplyDetails) -> Self {
        Self {
            status: ApplyStatus::Error,
            job_board: Some(job_board.into()),
            details: Some(details),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ApplyStatus::Success
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
