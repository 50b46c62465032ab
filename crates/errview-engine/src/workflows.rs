use errview_types::{DimensionValues, workflow_of};

/// Workflow IDs of `steps`, in input order.
///
/// A repeated ID is collapsed only when it equals the previously emitted one.
/// Over the sorted step index every workflow's steps are contiguous, so this
/// yields each workflow once.
pub fn workflow_ids<S: AsRef<str>>(steps: &[S]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for step in steps {
        let Some(id) = workflow_of(step.as_ref()) else {
            continue;
        };
        if ids.last().map(String::as_str) != Some(id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Indexed steps belonging to `workflow`, in index order.
pub fn steps_for_workflow(values: &DimensionValues, workflow: &str) -> Vec<String> {
    values
        .steps
        .iter()
        .filter(|step| workflow_of(step) == Some(workflow))
        .cloned()
        .collect()
}
