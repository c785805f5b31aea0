//! Applicant profile used to fill application forms.

use serde::{Deserialize, Serialize};

use crate::board::FieldKind;

/// The applicant's auto-fill data.
///
/// Every field is optional. Absent and empty values are skipped during fill;
/// nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Resume document: a local file path, a URL, or plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// Cover letter document: a local file path, a URL, or plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl Profile {
    /// Value for a field, treating an empty string as absent.
    pub fn value(&self, kind: FieldKind) -> Option<&str> {
        let value = match kind {
            FieldKind::FirstName => self.first_name.as_deref(),
            FieldKind::LastName => self.last_name.as_deref(),
            FieldKind::Email => self.email.as_deref(),
            FieldKind::Phone => self.phone.as_deref(),
            FieldKind::Resume => self.resume.as_deref(),
            FieldKind::CoverLetter => self.cover_letter.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        FieldKind::TEXT
            .iter()
            .chain(FieldKind::FILES.iter())
            .all(|kind| self.value(*kind).is_none())
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
