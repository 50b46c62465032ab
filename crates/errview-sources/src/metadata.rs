use crate::{Error, Fetcher, Result, SourceLocation};
use errview_types::WorkflowDescriptor;

/// Describes workflows: parameters, prep ID and related workflows.
pub trait WorkflowMetadata: Send + Sync {
    /// `Ok(None)` when the collaborator does not know the workflow.
    fn describe(&self, workflow: &str) -> Result<Option<WorkflowDescriptor>>;
}

/// Descriptors fetched one document per workflow from a location template
/// containing `{workflow}`, e.g. `https://host/workflows/{workflow}.json`.
pub struct LocationMetadata {
    fetcher: Fetcher,
    template: String,
}

impl LocationMetadata {
    pub fn new(fetcher: Fetcher, template: impl Into<String>) -> Self {
        Self {
            fetcher,
            template: template.into(),
        }
    }
}

impl WorkflowMetadata for LocationMetadata {
    fn describe(&self, workflow: &str) -> Result<Option<WorkflowDescriptor>> {
        let location = SourceLocation::for_workflow(&self.template, workflow);
        let Some(bytes) = self.fetcher.fetch_optional(&location)? else {
            return Ok(None);
        };

        let mut descriptor: WorkflowDescriptor =
            serde_json::from_slice(&bytes).map_err(|e| Error::malformed(&location, e))?;
        if descriptor.workflow.is_empty() {
            descriptor.workflow = workflow.to_string();
        }

        Ok(Some(descriptor))
    }
}
