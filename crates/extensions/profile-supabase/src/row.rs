use serde::Deserialize;

use autoapply_protocols::Profile;

/// A profile row as stored in the backend table.
///
/// Columns not listed here are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRow {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Older rows only carry a single name column.
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "resume")]
    pub resume_url: Option<String>,
    #[serde(alias = "cover_letter_url")]
    pub cover_letter: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        let (mut first_name, mut last_name) = (row.first_name, row.last_name);

        if first_name.is_none() && last_name.is_none() {
            if let Some(full) = row.full_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                match full.split_once(char::is_whitespace) {
                    Some((first, last)) => {
                        first_name = Some(first.to_string());
                        last_name = Some(last.trim().to_string());
                    }
                    None => first_name = Some(full.to_string()),
                }
            }
        }

        Profile {
            first_name,
            last_name,
            email: row.email,
            phone: row.phone,
            resume: row.resume_url,
            cover_letter: row.cover_letter,
        }
    }
}
