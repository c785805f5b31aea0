use super::BoardAdapter;

/// The generic path: selector-table fill, local file upload, apply click.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAdapter;

impl BoardAdapter for GenericAdapter {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn is_generic(&self) -> bool {
        true
    }
}
