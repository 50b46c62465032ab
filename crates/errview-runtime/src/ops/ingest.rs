use crate::Result;
use errview_index::{ErrorStore, InsertStats};
use errview_sources::{ErrorCounts, Fetcher, SourceLocation};

#[derive(Debug, Clone)]
pub enum IngestProgress {
    SourceFetching {
        location: String,
    },
    SourceLoaded {
        location: String,
        records: usize,
        inserted: usize,
        duplicates: usize,
    },
    Completed {
        sources: usize,
        inserted: usize,
        duplicates: usize,
    },
}

/// Outcome of one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub sources: usize,
    pub stats: InsertStats,
}

/// Loads an ordered list of sources into a store.
pub struct IngestService<'a> {
    fetcher: &'a Fetcher,
    sources: Vec<SourceLocation>,
}

impl<'a> IngestService<'a> {
    pub fn new(fetcher: &'a Fetcher, sources: Vec<SourceLocation>) -> Self {
        Self { fetcher, sources }
    }

    /// Fetch, parse and insert every source, then rebuild the store indexes
    /// once. The first fetch or parse failure aborts the pass.
    pub fn run<F>(&self, store: &mut ErrorStore, mut on_progress: F) -> Result<IngestReport>
    where
        F: FnMut(IngestProgress),
    {
        let mut report = IngestReport::default();

        for source in &self.sources {
            for location in source.expand()? {
                on_progress(IngestProgress::SourceFetching {
                    location: location.to_string(),
                });

                let bytes = self.fetcher.fetch(&location)?;
                let counts = ErrorCounts::from_slice(&location.to_string(), &bytes)?;
                let stats = load_counts(store, &counts)?;

                on_progress(IngestProgress::SourceLoaded {
                    location: location.to_string(),
                    records: counts.len(),
                    inserted: stats.inserted,
                    duplicates: stats.duplicates,
                });

                report.sources += 1;
                report.stats.merge(stats);
            }
        }

        store.rebuild_indexes()?;

        tracing::info!(
            sources = report.sources,
            inserted = report.stats.inserted,
            duplicates = report.stats.duplicates,
            "ingestion pass complete"
        );

        on_progress(IngestProgress::Completed {
            sources: report.sources,
            inserted: report.stats.inserted,
            duplicates: report.stats.duplicates,
        });

        Ok(report)
    }
}

/// Insert one parsed document without touching the indexes.
pub fn load_counts(store: &mut ErrorStore, counts: &ErrorCounts) -> Result<InsertStats> {
    let records = counts.records();
    Ok(store.insert_all(&records)?)
}
