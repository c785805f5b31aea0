//! Local and chained profile stores.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use autoapply_config::{ConfigLoader, ProfileConfig};
use autoapply_protocols::{Profile, ProfileStore, StoreError};

/// Profile kept as a camelCase JSON file.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, with `~` and environment variables expanded.
    pub fn from_config(config: &ProfileConfig) -> Self {
        Self::new(ConfigLoader::expand_path(&config.path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `profile` to the file, creating parent directories.
    pub async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(profile)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self) -> Result<Profile, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let profile: Profile = serde_json::from_str(&content)?;
        debug!("Loaded profile from {}", self.path.display());
        Ok(profile)
    }
}

/// Tries `primary`, then `secondary` when the primary fails or has nothing.
pub struct FallbackProfileStore {
    primary: Box<dyn ProfileStore>,
    secondary: Box<dyn ProfileStore>,
}

impl FallbackProfileStore {
    pub fn new(primary: Box<dyn ProfileStore>, secondary: Box<dyn ProfileStore>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl ProfileStore for FallbackProfileStore {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn load(&self) -> Result<Profile, StoreError> {
        match self.primary.load().await {
            Ok(profile) if !profile.is_empty() => return Ok(profile),
            Ok(_) => debug!("Profile store {} returned an empty profile", self.primary.name()),
            Err(e) => warn!(
                "Profile store {} failed, using {}: {}",
                self.primary.name(),
                self.secondary.name(),
                e
            ),
        }
        self.secondary.load().await
    }
}
