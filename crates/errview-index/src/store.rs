use errview_types::{Dimension, DimensionValues, ErrorRecord, SiteReadinessMap};
use rusqlite::Connection;
use std::path::Path;

use crate::queries;
use crate::schema::init_schema;
use crate::{InsertOutcome, InsertStats, RecordFilter, Result};

// NOTE: Store Design Rationale
//
// Why two kinds of store?
// - Session snapshots are rebuilt wholesale from the source and never merged,
//   so they append without a uniqueness check (Transient)
// - A database file fed from several overlapping reports must stay idempotent
//   under re-ingestion, so the first value of a key wins (Persisted)
//
// Why explicit rebuild_indexes()?
// - Maintaining sorted distinct lists per insert is O(n^2) over a bulk load
// - Readers always see the three lists of the same pass

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// In-memory, duplicate keys appended.
    Transient,
    /// Duplicate keys rejected with a warning; first value wins.
    Persisted,
}

pub struct ErrorStore {
    conn: Connection,
    kind: StoreKind,
    values: DimensionValues,
}

impl ErrorStore {
    /// Fresh transient store.
    pub fn open_in_memory() -> Result<Self> {
        Self::in_memory(StoreKind::Transient)
    }

    pub fn in_memory(kind: StoreKind) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, kind)
    }

    /// Open (or create) a persisted store file. Indexes are rebuilt from
    /// whatever the file already holds.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut store = Self::init(conn, StoreKind::Persisted)?;
        store.rebuild_indexes()?;

        tracing::info!(path = %path.display(), "store opened");
        Ok(store)
    }

    fn init(conn: Connection, kind: StoreKind) -> Result<Self> {
        init_schema(&conn, kind)?;
        Ok(Self {
            conn,
            kind,
            values: DimensionValues::default(),
        })
    }

    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    pub fn insert(&self, record: &ErrorRecord) -> Result<InsertOutcome> {
        let outcome = queries::records::insert(&self.conn, record, self.kind)?;
        if outcome == InsertOutcome::Duplicate {
            warn_duplicate(record);
        }
        Ok(outcome)
    }

    /// Insert many records in one transaction. Indexes are not touched; call
    /// `rebuild_indexes` once the pass is complete.
    pub fn insert_all<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a ErrorRecord>,
    ) -> Result<InsertStats> {
        let tx = self.conn.transaction()?;
        let mut stats = InsertStats::default();

        for record in records {
            let outcome = queries::records::insert(&tx, record, self.kind)?;
            if outcome == InsertOutcome::Duplicate {
                warn_duplicate(record);
            }
            stats.record(outcome);
        }

        tx.commit()?;
        Ok(stats)
    }

    /// Recompute all three distinct-value lists from the current rows.
    pub fn rebuild_indexes(&mut self) -> Result<()> {
        let values = DimensionValues::from_distinct(
            queries::records::distinct(&self.conn, Dimension::Step)?,
            queries::records::distinct(&self.conn, Dimension::Site)?,
            queries::records::distinct(&self.conn, Dimension::ErrorCode)?,
        );

        tracing::debug!(
            steps = values.steps.len(),
            sites = values.sites.len(),
            errorcodes = values.errorcodes.len(),
            "indexes rebuilt"
        );

        self.values = values;
        Ok(())
    }

    pub fn values(&self) -> &DimensionValues {
        &self.values
    }

    /// Count for one exact key, zero when absent.
    pub fn count(&self, step: &str, site: &str, errorcode: &str) -> Result<u64> {
        queries::records::count(&self.conn, step, site, errorcode)
    }

    /// Records matching a partial key, sorted by (errorcode, site, step).
    pub fn records(&self, filter: &RecordFilter) -> Result<Vec<ErrorRecord>> {
        queries::records::list(&self.conn, filter)
    }

    pub fn step_records(&self, step: &str) -> Result<Vec<ErrorRecord>> {
        self.records(&RecordFilter::step(step))
    }

    /// Replace the readiness classification joined against sites.
    pub fn set_readiness(&mut self, readiness: &SiteReadinessMap) -> Result<()> {
        let tx = self.conn.transaction()?;
        queries::readiness::replace_all(&tx, readiness)?;
        tx.commit()?;
        Ok(())
    }

    pub fn readiness(&self) -> Result<SiteReadinessMap> {
        queries::readiness::list(&self.conn)
    }

    /// Indexed sites whose readiness is one of `classes`, in index order.
    pub fn sites_with_readiness(&self, classes: &[String]) -> Result<Vec<String>> {
        let readiness = self.readiness()?;
        Ok(self
            .values
            .sites
            .iter()
            .filter(|site| {
                readiness
                    .get(site.as_str())
                    .is_some_and(|class| classes.contains(class))
            })
            .cloned()
            .collect())
    }

    pub fn record_count(&self) -> Result<usize> {
        queries::records::row_count(&self.conn)
    }

    pub fn total_errors(&self) -> Result<u64> {
        queries::records::total(&self.conn)
    }
}

impl Drop for ErrorStore {
    fn drop(&mut self) {
        tracing::info!(kind = ?self.kind, "store closed");
    }
}

fn warn_duplicate(record: &ErrorRecord) {
    tracing::warn!(
        step = %record.step,
        site = %record.site,
        errorcode = %record.errorcode,
        "key already exists in store, skipping duplicate"
    );
}
