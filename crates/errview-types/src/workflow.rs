use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Workflow identifier of a step name: the segment between the first two
/// slashes (`/wf/Task` -> `wf`).
pub fn workflow_of(step: &str) -> Option<&str> {
    step.strip_prefix('/')?
        .split('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

/// Recovery (ACDC) workflows carry the marker in their identifier.
pub fn is_acdc_workflow(workflow: &str) -> bool {
    workflow.contains("ACDC")
}

/// Descriptor returned by the workflow-metadata collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDescriptor {
    #[serde(default)]
    pub workflow: String,
    #[serde(default)]
    pub prep_id: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// Workflows sharing this workflow's request chain.
    #[serde(default)]
    pub related: Vec<String>,
    /// Location of this workflow's own `step -> errorcode -> site -> count` data.
    #[serde(default)]
    pub error_source: Option<String>,
}

impl WorkflowDescriptor {
    /// Related recovery (ACDC) workflows.
    pub fn acdc_workflows(&self) -> impl Iterator<Item = &str> {
        self.related
            .iter()
            .map(String::as_str)
            .filter(|name| is_acdc_workflow(name))
    }
}
