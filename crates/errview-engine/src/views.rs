use errview_index::{ErrorStore, RecordFilter, Result};
use errview_sources::Explanations;
use errview_types::{Dimension, workflow_of};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::headers::{HeaderTitle, header_titles};
use crate::pivot::{PivotResult, global_pivot};
use crate::table::{DenseTable, dense_step_table};
use crate::workflows::steps_for_workflow;

/// Every step of one workflow as a dense table over the shared axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowView {
    pub workflow: String,
    pub errorcodes: Vec<String>,
    pub sites: Vec<String>,
    pub steps: Vec<DenseTable>,
}

impl WorkflowView {
    pub fn total(&self) -> u64 {
        self.steps.iter().map(DenseTable::total).sum()
    }
}

/// `None` when the store has no step of `workflow`.
pub fn workflow_view(store: &ErrorStore, workflow: &str) -> Result<Option<WorkflowView>> {
    let steps = steps_for_workflow(store.values(), workflow);
    if steps.is_empty() {
        return Ok(None);
    }

    let tables = steps
        .iter()
        .map(|step| dense_step_table(store, step, None))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(WorkflowView {
        workflow: workflow.to_string(),
        errorcodes: store.values().errorcodes.clone(),
        sites: store.values().sites.clone(),
        steps: tables,
    }))
}

/// Global pivot with header tooltips for both axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalView {
    pub split: Dimension,
    pub rows: Vec<HeaderTitle>,
    pub columns: Vec<HeaderTitle>,
    pub pivot: PivotResult,
}

pub fn global_view(
    store: &ErrorStore,
    split: Dimension,
    explanations: &Explanations,
) -> Result<GlobalView> {
    let pivot = global_pivot(store, split)?;
    let rows = header_titles(pivot.layout.rows, &pivot.rows, &pivot.row_totals, explanations);
    let columns = header_titles(pivot.layout.cols, &pivot.cols, &pivot.col_totals, explanations);

    Ok(GlobalView {
        split,
        rows,
        columns,
        pivot,
    })
}

/// A workflow with errors at one (errorcode, site) intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowMatch {
    pub workflow: String,
    pub steps: Vec<String>,
    pub count: u64,
}

/// Workflows with a non-zero count of `errorcode` at `site`, by workflow ID.
pub fn workflows_matching(
    store: &ErrorStore,
    errorcode: &str,
    site: &str,
) -> Result<Vec<WorkflowMatch>> {
    let filter = RecordFilter::all()
        .with(Dimension::ErrorCode, errorcode)
        .with(Dimension::Site, site);

    let mut matches: BTreeMap<String, WorkflowMatch> = BTreeMap::new();
    for record in store.records(&filter)? {
        if record.count == 0 {
            continue;
        }
        let Some(workflow) = workflow_of(&record.step) else {
            continue;
        };
        let entry = matches
            .entry(workflow.to_string())
            .or_insert_with(|| WorkflowMatch {
                workflow: workflow.to_string(),
                steps: Vec::new(),
                count: 0,
            });
        if !entry.steps.contains(&record.step) {
            entry.steps.push(record.step.clone());
        }
        entry.count += record.count;
    }

    Ok(matches.into_values().collect())
}
