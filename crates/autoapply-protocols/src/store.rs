//! Profile store trait.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::profile::Profile;

/// A source of the applicant's profile.
///
/// Stores are read fresh for every auto-apply request; implementations must
/// not cache a profile across calls.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Load the current profile.
    async fn load(&self) -> Result<Profile, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticStore(Profile);

    #[async_trait]
    impl ProfileStore for StaticStore {
        fn name(&self) -> &str {
            "static"
        }

        async fn load(&self) -> Result<Profile, StoreError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_store_trait_object() {
        let store: Box<dyn ProfileStore> = Box::new(StaticStore(Profile {
            first_name: Some("Ada".to_string()),
            ..Default::default()
        }));
        assert_eq!(store.name(), "static");
        let profile = store.load().await.unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
    }
}
