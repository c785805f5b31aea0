//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub waits: WaitConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub supabase: SupabaseConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Browser connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote-debugging HTTP endpoint.
    #[serde(default = "default_browser_endpoint")]
    pub endpoint: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_browser_endpoint(),
        }
    }
}

fn default_browser_endpoint() -> String {
    "http://localhost:9222".to_string()
}

/// Element wait bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Bound for generic element waits.
    #[serde(default = "default_element_timeout_ms")]
    pub element_timeout_ms: u64,

    /// Bound for the apply-button wait.
    #[serde(default = "default_apply_timeout_ms")]
    pub apply_timeout_ms: u64,
}

impl WaitConfig {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn apply_timeout(&self) -> Duration {
        Duration::from_millis(self.apply_timeout_ms)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: default_element_timeout_ms(),
            apply_timeout_ms: default_apply_timeout_ms(),
        }
    }
}

fn default_element_timeout_ms() -> u64 {
    3000
}

fn default_apply_timeout_ms() -> u64 {
    2000
}

/// Auto-apply pipeline policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum fill/upload/click passes per message. A pass after the first
    /// only runs when the previous one filled the form but missed the apply
    /// button.
    #[serde(default = "default_max_passes")]
    pub max_passes: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
        }
    }
}

fn default_max_passes() -> u32 {
    1
}

/// Where the applicant profile comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    /// Local JSON file.
    #[default]
    File,
    /// Supabase REST table.
    Supabase,
    /// Supabase first, local file when the cloud copy is unavailable or empty.
    SupabaseThenFile,
}

impl ProfileSource {
    pub fn uses_supabase(&self) -> bool {
        matches!(self, ProfileSource::Supabase | ProfileSource::SupabaseThenFile)
    }
}

/// Profile source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub source: ProfileSource,

    /// Local profile file (supports `~`).
    #[serde(default = "default_profile_path")]
    pub path: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            source: ProfileSource::default(),
            path: default_profile_path(),
        }
    }
}

fn default_profile_path() -> String {
    "~/.autoapply/profile.json".to_string()
}

/// Supabase REST configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,

    /// User session token; the anon key is used as bearer when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default = "default_profile_table")]
    pub table: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            access_token: None,
            table: default_profile_table(),
        }
    }
}

fn default_profile_table() -> String {
    "user_profiles".to_string()
}

/// Local message endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
