use crate::Result;
use errview_sources::WorkflowMetadata;
use errview_types::WorkflowDescriptor;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-wide memo of workflow descriptors, keyed by workflow ID and by
/// prep ID. Failed lookups are not cached.
pub struct MetadataCache {
    source: Box<dyn WorkflowMetadata>,
    by_workflow: Mutex<HashMap<String, Option<WorkflowDescriptor>>>,
    by_prep_id: Mutex<HashMap<String, Vec<String>>>,
}

impl MetadataCache {
    pub fn new(source: Box<dyn WorkflowMetadata>) -> Self {
        Self {
            source,
            by_workflow: Mutex::new(HashMap::new()),
            by_prep_id: Mutex::new(HashMap::new()),
        }
    }

    pub fn describe(&self, workflow: &str) -> Result<Option<WorkflowDescriptor>> {
        if let Some(cached) = self.by_workflow.lock().get(workflow) {
            return Ok(cached.clone());
        }

        let descriptor = self.source.describe(workflow)?;

        if let Some(prep_id) = descriptor.as_ref().and_then(|d| d.prep_id.clone()) {
            let mut by_prep_id = self.by_prep_id.lock();
            let workflows = by_prep_id.entry(prep_id).or_default();
            if !workflows.iter().any(|w| w == workflow) {
                workflows.push(workflow.to_string());
            }
        }

        self.by_workflow
            .lock()
            .insert(workflow.to_string(), descriptor.clone());
        Ok(descriptor)
    }

    /// Workflows already described under `prep_id`, in lookup order.
    pub fn workflows_for_prep_id(&self, prep_id: &str) -> Vec<String> {
        self.by_prep_id
            .lock()
            .get(prep_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Memoized descriptors of the request chain `prep_id`, without asking
    /// the collaborator.
    pub fn chain(&self, prep_id: &str) -> Vec<WorkflowDescriptor> {
        let workflows = self.workflows_for_prep_id(prep_id);
        let by_workflow = self.by_workflow.lock();
        workflows
            .iter()
            .filter_map(|workflow| by_workflow.get(workflow).cloned().flatten())
            .collect()
    }

    pub fn clear(&self) {
        self.by_workflow.lock().clear();
        self.by_prep_id.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl WorkflowMetadata for Counting {
        fn describe(&self, workflow: &str) -> errview_sources::Result<Option<WorkflowDescriptor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if workflow == "unknown" {
                return Ok(None);
            }
            if workflow == "broken" {
                return Err(errview_sources::Error::unavailable(workflow, "timed out"));
            }
            Ok(Some(WorkflowDescriptor {
                workflow: workflow.to_string(),
                prep_id: Some("prep-1".to_string()),
                ..Default::default()
            }))
        }
    }

    fn cache() -> (MetadataCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = MetadataCache::new(Box::new(Counting {
            calls: Arc::clone(&calls),
        }));
        (cache, calls)
    }

    #[test]
    fn test_descriptors_are_memoized() {
        let (cache, calls) = cache();

        cache.describe("wf_a").unwrap();
        cache.describe("wf_a").unwrap();
        assert!(cache.describe("unknown").unwrap().is_none());
        assert!(cache.describe("unknown").unwrap().is_none());

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_prep_id_index() {
        let (cache, _) = cache();
        cache.describe("wf_a").unwrap();
        cache.describe("wf_b").unwrap();
        cache.describe("wf_a").unwrap();

        assert_eq!(cache.workflows_for_prep_id("prep-1"), vec!["wf_a", "wf_b"]);
        assert!(cache.workflows_for_prep_id("prep-2").is_empty());
    }

    #[test]
    fn test_chain_reads_memo_only() {
        let (cache, calls) = cache();
        cache.describe("wf_a").unwrap();
        cache.describe("wf_b").unwrap();

        let chain: Vec<String> = cache
            .chain("prep-1")
            .into_iter()
            .map(|d| d.workflow)
            .collect();
        assert_eq!(chain, vec!["wf_a", "wf_b"]);
        assert!(cache.chain("prep-2").is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_are_retried() {
        let (cache, calls) = cache();

        assert!(cache.describe("broken").is_err());
        assert!(cache.describe("broken").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.describe("wf_a").unwrap();
        cache.clear();
        cache.describe("wf_a").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
