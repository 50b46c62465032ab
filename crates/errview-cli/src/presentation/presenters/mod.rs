mod info;
mod listing;
mod pivot;

pub use info::{present_descriptor, present_explanation, present_ingest, present_snapshot};
pub use listing::{present_groups, present_workflow_list, present_workflow_matches};
pub use pivot::{present_dense_table, present_global, present_step_table, present_workflow};
