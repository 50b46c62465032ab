use crate::cache::{Access, CacheKey, CacheManager};
use crate::config::Config;
use crate::metadata::MetadataCache;
use crate::snapshot::{ErrorSnapshot, SourceSnapshotBuilder};
use crate::{Error, Result};
use errview_engine::{
    ErrorGroup, GlobalView, GroupKey, StepTable, TableMode, WorkflowMatch, WorkflowView,
    global_view, group_errors, leaf_entries, step_table, workflow_ids, workflow_view,
    workflows_matching,
};
use errview_sources::{Fetcher, LocationMetadata, LocationReadiness, SourceLocation};
use errview_types::{Dimension, DimensionValues, WorkflowDescriptor};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shown for an error code without a known explanation.
pub const NO_EXPLANATION: &str = "No info for this error code";

/// Size of one key's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub records: usize,
    pub total_errors: u64,
    pub workflows: usize,
    pub steps: usize,
    pub sites: usize,
    pub errorcodes: usize,
    pub created_at: Option<DateTime<Utc>>,
}

/// Entry point for consumers: cached snapshots and the views over them.
pub struct ErrView {
    config: Config,
    cache: CacheManager,
    metadata: Option<Arc<MetadataCache>>,
}

impl ErrView {
    /// Open the workspace at `data_dir`, reading its `config.toml` when present.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = Config::load_from(&Self::config_path(data_dir))?;
        Self::from_config(config)
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch_timeout())?;

        let metadata = config.metadata.as_ref().map(|template| {
            Arc::new(MetadataCache::new(Box::new(LocationMetadata::new(
                fetcher.clone(),
                template.clone(),
            ))))
        });

        let mut builder = SourceSnapshotBuilder::new(fetcher.clone(), config.source_locations());
        if let Some(location) = &config.explanations {
            builder = builder.with_explanations(SourceLocation::resolve(location));
        }
        if let Some(location) = &config.readiness {
            builder = builder.with_readiness(Box::new(LocationReadiness::new(
                fetcher.clone(),
                SourceLocation::resolve(location),
            )));
        }
        if config.include_related {
            let Some(metadata) = &metadata else {
                return Err(Error::Config(
                    "include_related requires a metadata location".to_string(),
                ));
            };
            builder = builder.with_related(Arc::clone(metadata));
        }

        let cache = CacheManager::new(Arc::new(builder), config.staleness());

        Ok(Self {
            config,
            cache,
            metadata,
        })
    }

    /// Use an already-built cache (for alternative snapshot builders).
    pub fn with_cache(config: Config, cache: CacheManager) -> Self {
        Self {
            config,
            cache,
            metadata: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    fn read<T>(
        &self,
        key: &CacheKey,
        access: Access,
        read: impl FnOnce(&ErrorSnapshot) -> errview_index::Result<T>,
    ) -> Result<T> {
        Ok(self.cache.with_snapshot(key, access, read)??)
    }

    pub fn global(&self, key: &CacheKey, split: Dimension) -> Result<GlobalView> {
        self.read(key, Access::Refreshing, |snapshot| {
            global_view(&snapshot.store, split, &snapshot.explanations)
        })
    }

    pub fn workflow(&self, key: &CacheKey, workflow: &str) -> Result<Option<WorkflowView>> {
        self.read(key, Access::Refreshing, |snapshot| {
            workflow_view(&snapshot.store, workflow)
        })
    }

    pub fn workflows(&self, key: &CacheKey) -> Result<Vec<String>> {
        self.read(key, Access::Refreshing, |snapshot| {
            Ok(workflow_ids(&snapshot.store.values().steps))
        })
    }

    pub fn values(&self, key: &CacheKey) -> Result<DimensionValues> {
        self.read(key, Access::Direct, |snapshot| Ok(snapshot.store.values().clone()))
    }

    pub fn step_table(
        &self,
        key: &CacheKey,
        step: &str,
        mode: TableMode,
        readiness: Option<&[String]>,
    ) -> Result<StepTable> {
        self.read(key, Access::Direct, |snapshot| {
            step_table(&snapshot.store, step, mode, readiness)
        })
    }

    pub fn workflows_matching(
        &self,
        key: &CacheKey,
        errorcode: &str,
        site: &str,
    ) -> Result<Vec<WorkflowMatch>> {
        self.read(key, Access::Refreshing, |snapshot| {
            workflows_matching(&snapshot.store, errorcode, site)
        })
    }

    /// Leaf entries keyed by `by`, folded with `group_key`.
    pub fn groups(
        &self,
        key: &CacheKey,
        by: Dimension,
        group_key: GroupKey,
    ) -> Result<BTreeMap<String, ErrorGroup>> {
        let leaves = self.read(key, Access::Refreshing, |snapshot| {
            leaf_entries(&snapshot.store, by)
        })?;
        Ok(group_errors(&leaves, |name| group_key.apply(name), &[]))
    }

    /// Log snippets explaining `errorcode`.
    pub fn explain(&self, key: &CacheKey, errorcode: &str) -> Result<Vec<String>> {
        self.read(key, Access::Direct, |snapshot| {
            Ok(snapshot
                .explanations
                .get(errorcode)
                .map(<[String]>::to_vec)
                .unwrap_or_else(|| vec![NO_EXPLANATION.to_string()]))
        })
    }

    pub fn summary(&self, key: &CacheKey) -> Result<SnapshotSummary> {
        let mut summary = self.read(key, Access::Refreshing, |snapshot| {
            let values = snapshot.store.values();
            Ok(SnapshotSummary {
                records: snapshot.store.record_count()?,
                total_errors: snapshot.store.total_errors()?,
                workflows: workflow_ids(&values.steps).len(),
                steps: values.steps.len(),
                sites: values.sites.len(),
                errorcodes: values.errorcodes.len(),
                created_at: None,
            })
        })?;
        summary.created_at = self.cache.created_at(key);
        Ok(summary)
    }

    pub fn describe(&self, workflow: &str) -> Result<Option<WorkflowDescriptor>> {
        match &self.metadata {
            Some(metadata) => metadata.describe(workflow),
            None => Err(Error::InvalidOperation(
                "no workflow metadata location configured".to_string(),
            )),
        }
    }

    pub fn reset(&self, key: &CacheKey) {
        self.cache.reset(key);
        if let Some(metadata) = &self.metadata {
            metadata.clear();
        }
    }

    /// End a session: its snapshot and cache slot are dropped.
    pub fn expire(&self, key: &CacheKey) {
        self.cache.expire(key);
    }

    pub fn refresh(&self, key: &CacheKey) -> Result<()> {
        self.cache.refresh(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace(body: &str) -> (TempDir, ErrView) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("all_errors.json");
        std::fs::write(&source, body).unwrap();

        let config = Config {
            sources: vec![source.display().to_string()],
            ..Default::default()
        };
        config.save_to(&ErrView::config_path(dir.path())).unwrap();

        let view = ErrView::open(dir.path()).unwrap();
        (dir, view)
    }

    #[test]
    fn test_views_share_one_snapshot() {
        let (_dir, errview) = workspace(r#"{"/A/Step1": {"8020": {"T2_US_X": 5}}}"#);
        let key = CacheKey::Process;

        assert_eq!(errview.workflows(&key).unwrap(), vec!["A"]);
        let global = errview.global(&key, Dimension::ErrorCode).unwrap();
        assert_eq!(global.pivot.grand_total(), 5);

        let created = errview.cache().created_at(&key);
        errview.step_table(&key, "/A/Step1", TableMode::Dense, None).unwrap();
        assert_eq!(errview.cache().created_at(&key), created);
    }

    #[test]
    fn test_explain_defaults_when_unknown() {
        let (_dir, errview) = workspace(r#"{"/A/Step1": {"8020": {"T2_US_X": 5}}}"#);
        assert_eq!(
            errview.explain(&CacheKey::Process, "8020").unwrap(),
            vec![NO_EXPLANATION]
        );
    }

    #[test]
    fn test_summary_counts_snapshot() {
        let (_dir, errview) = workspace(
            r#"{"/A/Step1": {"8020": {"T2_US_X": 5, "T1_DE_Y": 1}}, "/B/Merge": {"134": {"T2_US_X": 2}}}"#,
        );
        let summary = errview.summary(&CacheKey::Process).unwrap();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.total_errors, 8);
        assert_eq!(summary.workflows, 2);
        assert_eq!((summary.steps, summary.sites, summary.errorcodes), (2, 2, 2));
        assert!(summary.created_at.is_some());
    }

    #[test]
    fn test_expired_session_releases_its_slot() {
        let (_dir, errview) = workspace(r#"{"/A/Step1": {"8020": {"T2_US_X": 5}}}"#);
        let session = CacheKey::session("s1");
        errview.workflows(&CacheKey::Process).unwrap();
        errview.workflows(&session).unwrap();
        assert_eq!(errview.cache().key_count(), 2);

        errview.expire(&session);
        assert_eq!(errview.cache().key_count(), 1);

        errview.reset(&CacheKey::Process);
        assert!(errview.cache().created_at(&CacheKey::Process).is_none());
        assert_eq!(errview.workflows(&CacheKey::Process).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_describe_without_metadata_is_invalid() {
        let (_dir, errview) = workspace("{}");
        assert!(matches!(
            errview.describe("A"),
            Err(Error::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_include_related_requires_metadata() {
        let config = Config {
            include_related: true,
            ..Default::default()
        };
        assert!(matches!(ErrView::from_config(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_groups_by_workflow() {
        let (_dir, errview) = workspace(
            r#"{"/A/Step1": {"8020": {"T2_US_X": 5}}, "/A/Step2": {"134": {"T2_US_X": 1}}}"#,
        );
        let groups = errview
            .groups(&CacheKey::Process, Dimension::Step, GroupKey::Workflow)
            .unwrap();
        assert_eq!(groups["A"].total, 6);
        assert_eq!(groups["A"].subgroups.len(), 2);
    }
}
