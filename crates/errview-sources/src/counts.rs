use crate::{Error, Result};
use errview_types::{ErrorRecord, workflow_of};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type SiteCounts = BTreeMap<String, u64>;
type CodeCounts = BTreeMap<String, SiteCounts>;

/// The nested `step -> errorcode -> site -> count` document produced by the
/// production error report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCounts(BTreeMap<String, CodeCounts>);

impl ErrorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a document read from `location`.
    pub fn from_slice(location: &str, bytes: &[u8]) -> Result<Self> {
        let counts: ErrorCounts =
            serde_json::from_slice(bytes).map_err(|e| Error::malformed(location, e))?;

        if let Some(step) = counts.0.keys().find(|step| workflow_of(step).is_none()) {
            return Err(Error::malformed(
                location,
                format!("step name '{}' is not of the form /<workflow>/<step>", step),
            ));
        }

        Ok(counts)
    }

    /// Add `count` to the `(step, errorcode, site)` cell.
    pub fn add(&mut self, step: &str, errorcode: &str, site: &str, count: u64) {
        *self
            .0
            .entry(step.to_string())
            .or_default()
            .entry(errorcode.to_string())
            .or_default()
            .entry(site.to_string())
            .or_default() += count;
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ErrorRecord>) -> Self {
        let mut counts = Self::new();
        for record in records {
            counts.add(&record.step, &record.errorcode, &record.site, record.count);
        }
        counts
    }

    /// Flatten into records, ordered by step, then error code, then site.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.0
            .iter()
            .flat_map(|(step, codes)| {
                codes.iter().flat_map(move |(errorcode, sites)| {
                    sites
                        .iter()
                        .map(move |(site, count)| ErrorRecord::new(step, site, errorcode, *count))
                })
            })
            .collect()
    }

    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of `(step, errorcode, site)` cells.
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|codes| codes.values())
            .map(|sites| sites.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
