//! Per-board selector table.
//!
//! One immutable record per supported board. A new board integration only has
//! to supply a [`BoardSelectors`] here and a hostname fragment in
//! [`BoardId::as_str`].

use autoapply_protocols::{BoardId, BoardSelectors};

const GREENHOUSE: BoardSelectors = BoardSelectors {
    apply_button: ".application-header .btn-primary",
    name_field: Some("#first_name"),
    last_name_field: Some("#last_name"),
    email_field: Some("#email"),
    phone_field: Some("#phone"),
    resume_field: Some("#resume"),
    cover_letter_field: Some("#cover_letter"),
};

const LEVER: BoardSelectors = BoardSelectors {
    apply_button: ".postings-btn-wrapper .postings-btn",
    name_field: Some("input[name='name']"),
    last_name_field: None,
    email_field: Some("input[name='email']"),
    phone_field: Some("input[name='phone']"),
    resume_field: Some("input[name='resume']"),
    cover_letter_field: Some("textarea[name='comments']"),
};

const WORKDAY: BoardSelectors = BoardSelectors {
    apply_button: "a[data-automation-id='adventureButton']",
    name_field: Some("input[data-automation-id='legalNameSection_firstName']"),
    last_name_field: Some("input[data-automation-id='legalNameSection_lastName']"),
    email_field: Some("input[data-automation-id='email']"),
    phone_field: Some("input[data-automation-id='phone-number']"),
    resume_field: Some("input[data-automation-id='file-upload-input-ref']"),
    cover_letter_field: None,
};

const SMARTRECRUITERS: BoardSelectors = BoardSelectors {
    apply_button: "button[data-test='footer-submit']",
    name_field: Some("input#firstName"),
    last_name_field: Some("input#lastName"),
    email_field: Some("input#email"),
    phone_field: Some("input#phoneNumber"),
    resume_field: Some("input[type='file'][name='resume']"),
    cover_letter_field: None,
};

const ICIMS: BoardSelectors = BoardSelectors {
    apply_button: "a.iCIMS_ApplyOnlineButton",
    name_field: Some("input#FirstName"),
    last_name_field: Some("input#LastName"),
    email_field: Some("input#EmailAddress"),
    phone_field: Some("input#PhoneNumber"),
    resume_field: Some("input[type='file']#resume_upload"),
    cover_letter_field: None,
};

const BAMBOOHR: BoardSelectors = BoardSelectors {
    apply_button: "button[type='submit'].fab-Button",
    name_field: Some("input[name='firstName']"),
    last_name_field: Some("input[name='lastName']"),
    email_field: Some("input[name='email']"),
    phone_field: Some("input[name='phone']"),
    resume_field: Some("input[name='resumeFileId']"),
    cover_letter_field: Some("input[name='coverLetterFileId']"),
};

const JOBVITE: BoardSelectors = BoardSelectors {
    apply_button: "a.jv-button-apply",
    name_field: Some("input#jv-field-first-name"),
    last_name_field: Some("input#jv-field-last-name"),
    email_field: Some("input#jv-field-email"),
    phone_field: Some("input#jv-field-phone"),
    resume_field: Some("input[type='file'].jv-resume-upload"),
    cover_letter_field: None,
};

const TALEO: BoardSelectors = BoardSelectors {
    apply_button: "a#applyFlowButton",
    name_field: Some("input[id$='personal_info_FirstName']"),
    last_name_field: Some("input[id$='personal_info_LastName']"),
    email_field: Some("input[id$='personal_info_EmailAddress']"),
    phone_field: Some("input[id$='personal_info_HomePhone']"),
    resume_field: Some("input[type='file'][id$='AttachedFilesInput']"),
    cover_letter_field: None,
};

/// Selector record for a board.
pub fn selectors(board: BoardId) -> &'static BoardSelectors {
    match board {
        BoardId::Greenhouse => &GREENHOUSE,
        BoardId::Lever => &LEVER,
        BoardId::Workday => &WORKDAY,
        BoardId::SmartRecruiters => &SMARTRECRUITERS,
        BoardId::Icims => &ICIMS,
        BoardId::BambooHr => &BAMBOOHR,
        BoardId::Jobvite => &JOBVITE,
        BoardId::Taleo => &TALEO,
    }
}

/// Selector record for a board key such as `"greenhouse"`.
///
/// The key must be a board identifier exactly as [`BoardId::as_str`] spells
/// it; anything else yields `None`.
pub fn lookup(key: &str) -> Option<(BoardId, &'static BoardSelectors)> {
    let board = BoardId::ALL.into_iter().find(|board| board.as_str() == key)?;
    Some((board, selectors(board)))
}

/// Every board with its selectors, in detection order.
pub fn all() -> impl Iterator<Item = (BoardId, &'static BoardSelectors)> {
    BoardId::ALL.into_iter().map(|board| (board, selectors(board)))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
