use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One failure count: how many jobs of `step` failed with `errorcode` at `site`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Step name, always `/<workflow>/<rest...>`.
    pub step: String,
    pub site: String,
    /// Exit code as reported by the source. Usually numeric, kept as text.
    pub errorcode: String,
    pub count: u64,
}

impl ErrorRecord {
    pub fn new(
        step: impl Into<String>,
        site: impl Into<String>,
        errorcode: impl Into<String>,
        count: u64,
    ) -> Self {
        Self {
            step: step.into(),
            site: site.into(),
            errorcode: errorcode.into(),
            count,
        }
    }

    /// Composite key `(step, site, errorcode)`.
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.step, &self.site, &self.errorcode)
    }

    pub fn workflow(&self) -> Option<&str> {
        crate::workflow_of(&self.step)
    }
}

/// Site name to readiness classification, as supplied by the readiness
/// collaborator. Values are opaque to the store and the engine.
pub type SiteReadinessMap = BTreeMap<String, String>;
