use errview_types::Dimension;

/// Result of inserting one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A persisted store already held the `(step, site, errorcode)` key; the
    /// record was skipped and the first value kept.
    Duplicate,
}

/// Totals of a bulk insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    pub inserted: usize,
    pub duplicates: usize,
}

impl InsertStats {
    pub fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::Duplicate => self.duplicates += 1,
        }
    }

    pub fn merge(&mut self, other: InsertStats) {
        self.inserted += other.inserted;
        self.duplicates += other.duplicates;
    }
}

/// Partial key for ordered record scans.
///
/// Unset fields match everything. `readiness`, when set, keeps only sites
/// whose readiness classification is one of the listed values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub step: Option<String>,
    pub site: Option<String>,
    pub errorcode: Option<String>,
    pub readiness: Option<Vec<String>>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn step(step: impl Into<String>) -> Self {
        Self::default().with(Dimension::Step, step)
    }

    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match dimension {
            Dimension::Step => self.step = value,
            Dimension::Site => self.site = value,
            Dimension::ErrorCode => self.errorcode = value,
        }
        self
    }

    pub fn with_readiness(mut self, classes: Vec<String>) -> Self {
        self.readiness = Some(classes);
        self
    }
}
