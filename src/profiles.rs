//! Profile store selection.

use std::path::Path;

use autoapply_config::{Config, ProfileSource};
use autoapply_core::{FallbackProfileStore, FileProfileStore};
use autoapply_profile_supabase::SupabaseProfileStore;
use autoapply_protocols::{ProfileStore, StoreError};

/// The store `config.profile.source` names.
pub(crate) fn build_store(config: &Config) -> Result<Box<dyn ProfileStore>, StoreError> {
    let file = || -> Box<dyn ProfileStore> { Box::new(FileProfileStore::from_config(&config.profile)) };

    let store: Box<dyn ProfileStore> = match config.profile.source {
        ProfileSource::File => file(),
        ProfileSource::Supabase => Box::new(SupabaseProfileStore::from_config(&config.supabase)?),
        ProfileSource::SupabaseThenFile => Box::new(FallbackProfileStore::new(
            Box::new(SupabaseProfileStore::from_config(&config.supabase)?),
            file(),
        )),
    };
    Ok(store)
}

/// An explicit profile file, or the configured store.
pub(crate) fn store_for(config: &Config, profile: Option<&Path>) -> Result<Box<dyn ProfileStore>, StoreError> {
    match profile {
        Some(path) => Ok(Box::new(FileProfileStore::new(path))),
        None => build_store(config),
    }
}
