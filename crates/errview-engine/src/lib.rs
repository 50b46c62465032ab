// Engine module - Core aggregation logic (step tables, pivots, grouping)
// This layer sits between the relational store (index) and consumers (runtime, CLI)

pub mod grouping;
pub mod headers;
pub mod pivot;
pub mod table;
pub mod views;
pub mod workflows;

pub use grouping::{Decorator, ErrorCells, ErrorGroup, GroupKey, group_errors, leaf_entries};
pub use headers::{HeaderTitle, header_titles};
pub use pivot::{PivotResult, global_pivot};
pub use table::{
    DenseTable, SparseCells, SparseTable, StepTable, TableMode, dense_step_table,
    sparse_step_table, step_table,
};
pub use views::{
    GlobalView, WorkflowMatch, WorkflowView, global_view, workflow_view, workflows_matching,
};
pub use workflows::{steps_for_workflow, workflow_ids};
