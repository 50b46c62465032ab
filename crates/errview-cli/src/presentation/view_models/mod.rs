mod info;
mod listing;
mod pivot;
mod result;

pub use info::{DescriptorViewModel, ExplanationViewModel, IngestViewModel, SnapshotViewModel};
pub use listing::{
    GroupListViewModel, GroupMemberViewModel, GroupViewModel, WorkflowListViewModel,
    WorkflowMatchListViewModel, WorkflowMatchViewModel,
};
pub use pivot::{
    CellViewModel, DenseTableViewModel, GlobalViewModel, HeaderViewModel, PivotViewModel,
    SparseCellViewModel, SparseTableViewModel, StepTableViewModel, WorkflowViewModel,
};
pub use result::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
