use crate::{Error, Result};
use errview_sources::SourceLocation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Production error report loaded when no source is configured.
/// Upper bound on `staleness_minutes`: one year.
pub const MAX_STALENESS_MINUTES: u64 = 60 * 24 * 365;

pub const DEFAULT_SOURCE: &str = "https://cmst2.web.cern.ch/cmst2/unified/all_errors.json";

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. ERRVIEW_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.errview (fallback for systems without XDG)
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: ERRVIEW_PATH environment variable
    if let Ok(env_path) = std::env::var("ERRVIEW_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: XDG data directory
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("errview"));
    }

    // Priority 4: ~/.errview
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".errview"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Error-count documents (files, directories of `.json` files, or URLs),
    /// loaded in order into every snapshot.
    pub sources: Vec<String>,
    /// `errorcode -> [log snippet]` document.
    pub explanations: Option<String>,
    /// `{site: classification}` document.
    pub readiness: Option<String>,
    /// Per-workflow descriptor location containing `{workflow}`.
    pub metadata: Option<String>,
    pub staleness_minutes: u64,
    pub fetch_timeout_secs: u64,
    /// Also ingest related recovery (ACDC) workflows found through `metadata`.
    pub include_related: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![DEFAULT_SOURCE.to_string()],
            explanations: None,
            readiness: None,
            metadata: None,
            staleness_minutes: 30,
            fetch_timeout_secs: 30,
            include_related: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_workspace_path(None)?.join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(Error::Config("at least one source is required".to_string()));
        }
        if self.staleness_minutes > MAX_STALENESS_MINUTES {
            return Err(Error::Config(format!(
                "staleness_minutes must be at most {}",
                MAX_STALENESS_MINUTES
            )));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(Error::Config("fetch_timeout_secs must be positive".to_string()));
        }
        if let Some(template) = &self.metadata
            && !template.contains("{workflow}")
        {
            return Err(Error::Config(format!(
                "metadata location '{}' has no {{workflow}} placeholder",
                template
            )));
        }
        Ok(())
    }

    /// Replace the configured sources, keeping everything else.
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        if !sources.is_empty() {
            self.sources = sources;
        }
        self
    }

    pub fn source_locations(&self) -> Vec<SourceLocation> {
        self.sources
            .iter()
            .map(|s| SourceLocation::resolve(s))
            .collect()
    }

    pub fn staleness(&self) -> chrono::Duration {
        let minutes = self.staleness_minutes.min(MAX_STALENESS_MINUTES);
        chrono::Duration::minutes(minutes as i64)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
