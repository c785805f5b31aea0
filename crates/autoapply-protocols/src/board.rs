//! Job board identifiers and the selector record every board integration provides.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported job-application platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardId {
    Greenhouse,
    Lever,
    Workday,
    SmartRecruiters,
    Icims,
    BambooHr,
    Jobvite,
    Taleo,
}

impl BoardId {
    /// Every board, in detection order.
    pub const ALL: [BoardId; 8] = [
        BoardId::Greenhouse,
        BoardId::Lever,
        BoardId::Workday,
        BoardId::SmartRecruiters,
        BoardId::Icims,
        BoardId::BambooHr,
        BoardId::Jobvite,
        BoardId::Taleo,
    ];

    /// The lowercase identifier, which doubles as the hostname fragment.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardId::Greenhouse => "greenhouse",
            BoardId::Lever => "lever",
            BoardId::Workday => "workday",
            BoardId::SmartRecruiters => "smartrecruiters",
            BoardId::Icims => "icims",
            BoardId::BambooHr => "bamboohr",
            BoardId::Jobvite => "jobvite",
            BoardId::Taleo => "taleo",
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A profile-backed form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    FirstName,
    LastName,
    Email,
    Phone,
    Resume,
    CoverLetter,
}

impl FieldKind {
    /// Text fields filled by value assignment, in fill order.
    pub const TEXT: [FieldKind; 4] = [
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Email,
        FieldKind::Phone,
    ];

    /// File fields handled by the upload step.
    pub const FILES: [FieldKind; 2] = [FieldKind::Resume, FieldKind::CoverLetter];
}

/// CSS selectors for one board.
///
/// `apply_button` is required; the field selectors are optional because not
/// every board exposes every field on its first form page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSelectors {
    pub apply_button: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name_field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_field: Option<&'static str>,
}

impl BoardSelectors {
    /// Selector for a profile field, if the board defines one.
    pub fn field(&self, kind: FieldKind) -> Option<&'static str> {
        match kind {
            FieldKind::FirstName => self.name_field,
            FieldKind::LastName => self.last_name_field,
            FieldKind::Email => self.email_field,
            FieldKind::Phone => self.phone_field,
            FieldKind::Resume => self.resume_field,
            FieldKind::CoverLetter => self.cover_letter_field,
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
