use crate::{Fetcher, Result, SourceLocation};
use errview_types::SiteReadinessMap;

/// Supplies a readiness classification for each site.
pub trait SiteReadinessSource: Send + Sync {
    fn readiness(&self) -> Result<SiteReadinessMap>;
}

/// Readiness read from a `{site: classification}` JSON document.
pub struct LocationReadiness {
    fetcher: Fetcher,
    location: SourceLocation,
}

impl LocationReadiness {
    pub fn new(fetcher: Fetcher, location: SourceLocation) -> Self {
        Self { fetcher, location }
    }
}

impl SiteReadinessSource for LocationReadiness {
    fn readiness(&self) -> Result<SiteReadinessMap> {
        self.fetcher.fetch_json(&self.location)
    }
}

/// Fixed readiness map, for callers that already hold the classification.
#[derive(Debug, Clone, Default)]
pub struct StaticReadiness(pub SiteReadinessMap);

impl SiteReadinessSource for StaticReadiness {
    fn readiness(&self) -> Result<SiteReadinessMap> {
        Ok(self.0.clone())
    }
}
