use crate::Result;
use crate::cache::CacheKey;
use crate::metadata::MetadataCache;
use crate::ops::ingest::{IngestService, load_counts};
use errview_engine::workflow_ids;
use errview_index::ErrorStore;
use errview_sources::{ErrorCounts, Explanations, Fetcher, SiteReadinessSource, SourceLocation};
use errview_types::{WorkflowDescriptor, is_acdc_workflow};
use std::collections::HashSet;
use std::sync::Arc;

/// Everything one cache key serves: the store plus the documents loaded
/// alongside it.
pub struct ErrorSnapshot {
    pub store: ErrorStore,
    pub explanations: Explanations,
}

impl ErrorSnapshot {
    pub fn new(store: ErrorStore) -> Self {
        Self {
            store,
            explanations: Explanations::default(),
        }
    }
}

/// Builds a fresh snapshot for a cache key.
pub trait SnapshotBuilder: Send + Sync {
    fn build(&self, key: &CacheKey) -> Result<ErrorSnapshot>;
}

/// Builds snapshots by ingesting the configured sources into a transient
/// store.
///
/// Explanations and readiness are optional: when they cannot be loaded the
/// snapshot is still built, without them.
pub struct SourceSnapshotBuilder {
    fetcher: Fetcher,
    sources: Vec<SourceLocation>,
    explanations: Option<SourceLocation>,
    readiness: Option<Box<dyn SiteReadinessSource>>,
    related: Option<Arc<MetadataCache>>,
}

impl SourceSnapshotBuilder {
    pub fn new(fetcher: Fetcher, sources: Vec<SourceLocation>) -> Self {
        Self {
            fetcher,
            sources,
            explanations: None,
            readiness: None,
            related: None,
        }
    }

    pub fn with_explanations(mut self, location: SourceLocation) -> Self {
        self.explanations = Some(location);
        self
    }

    pub fn with_readiness(mut self, readiness: Box<dyn SiteReadinessSource>) -> Self {
        self.readiness = Some(readiness);
        self
    }

    /// Ingest related recovery workflows into the process-wide snapshot.
    pub fn with_related(mut self, metadata: Arc<MetadataCache>) -> Self {
        self.related = Some(metadata);
        self
    }

    fn load_explanations(&self) -> Explanations {
        let Some(location) = &self.explanations else {
            return Explanations::default();
        };
        match Explanations::load(&self.fetcher, location) {
            Ok(explanations) => explanations,
            Err(err) => {
                tracing::warn!(error = %err, "error explanations unavailable");
                Explanations::default()
            }
        }
    }

    fn load_readiness(&self, store: &mut ErrorStore) -> Result<()> {
        let Some(source) = &self.readiness else {
            return Ok(());
        };
        match source.readiness() {
            Ok(readiness) => store.set_readiness(&readiness)?,
            Err(err) => tracing::warn!(error = %err, "site readiness unavailable"),
        }
        Ok(())
    }

    /// Load the error sources of related ACDC workflows not already present.
    ///
    /// Candidates are the ACDC workflows a present workflow lists, plus the
    /// ACDC members of its request chain already memoized under its prep ID.
    /// Each workflow is attempted at most once per build, and a related
    /// source that cannot be fetched or parsed is skipped.
    fn load_related(&self, store: &mut ErrorStore, metadata: &MetadataCache) -> Result<()> {
        let present = workflow_ids(&store.values().steps);
        let mut seen: HashSet<String> = present.iter().cloned().collect();
        let mut loaded = 0;

        for workflow in &present {
            let descriptor = match metadata.describe(workflow) {
                Ok(Some(descriptor)) => descriptor,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(%workflow, error = %err, "workflow metadata unavailable");
                    continue;
                }
            };

            let mut candidates: Vec<(String, Option<WorkflowDescriptor>)> = descriptor
                .acdc_workflows()
                .map(|related| (related.to_string(), None))
                .collect();
            if let Some(prep_id) = &descriptor.prep_id {
                candidates.extend(
                    metadata
                        .chain(prep_id)
                        .into_iter()
                        .filter(|member| is_acdc_workflow(&member.workflow))
                        .map(|member| (member.workflow.clone(), Some(member))),
                );
            }

            for (related, known) in candidates {
                if !seen.insert(related.clone()) {
                    continue;
                }
                let known = match known {
                    Some(known) => Some(known),
                    None => match metadata.describe(&related) {
                        Ok(described) => described,
                        Err(err) => {
                            tracing::warn!(workflow = %related, error = %err, "workflow metadata unavailable");
                            None
                        }
                    },
                };
                let Some(source) = known.and_then(|d| d.error_source) else {
                    continue;
                };

                match self.fetch_counts(&source) {
                    Ok(counts) => {
                        load_counts(store, &counts)?;
                        loaded += 1;
                    }
                    Err(err) => {
                        tracing::warn!(workflow = %related, error = %err, "related workflow errors unavailable");
                    }
                }
            }
        }

        if loaded > 0 {
            tracing::info!(loaded, "related workflows ingested");
            store.rebuild_indexes()?;
        }
        Ok(())
    }

    fn fetch_counts(&self, source: &str) -> errview_sources::Result<ErrorCounts> {
        let bytes = self.fetcher.fetch(&SourceLocation::resolve(source))?;
        ErrorCounts::from_slice(source, &bytes)
    }
}

impl SnapshotBuilder for SourceSnapshotBuilder {
    fn build(&self, key: &CacheKey) -> Result<ErrorSnapshot> {
        let mut store = ErrorStore::open_in_memory()?;

        IngestService::new(&self.fetcher, self.sources.clone()).run(&mut store, |progress| {
            tracing::debug!(?progress, "ingest");
        })?;

        if let (CacheKey::Process, Some(metadata)) = (key, &self.related) {
            self.load_related(&mut store, metadata)?;
        }

        self.load_readiness(&mut store)?;
        let explanations = self.load_explanations();

        Ok(ErrorSnapshot {
            store,
            explanations,
        })
    }
}
