use serde::Serialize;

// --------------------------------------------------------
// Global pivot
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GlobalViewModel {
    pub split: String,
    pub rows: Vec<HeaderViewModel>,
    pub columns: Vec<HeaderViewModel>,
    pub pivot: PivotViewModel,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderViewModel {
    pub name: String,
    pub display: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PivotViewModel {
    pub row_dimension: String,
    pub col_dimension: String,
    pub row_totals: Vec<u64>,
    pub col_totals: Vec<u64>,
    pub grand_total: u64,
    /// `cells[row][col]`, aligned with the headers.
    pub cells: Vec<Vec<CellViewModel>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellViewModel {
    pub total: u64,
    /// Non-zero counts of the split dimension, in its order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<u64>,
    pub title: String,
}

// --------------------------------------------------------
// Step tables
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StepTableViewModel {
    Dense(DenseTableViewModel),
    Sparse(SparseTableViewModel),
}

#[derive(Debug, Clone, Serialize)]
pub struct DenseTableViewModel {
    pub step: String,
    pub total: u64,
    pub errorcodes: Vec<String>,
    pub sites: Vec<String>,
    /// `rows[errorcode][site]`.
    pub rows: Vec<Vec<u64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SparseTableViewModel {
    pub step: String,
    pub total: u64,
    pub cells: Vec<SparseCellViewModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SparseCellViewModel {
    pub errorcode: String,
    pub site: String,
    pub count: u64,
}

// --------------------------------------------------------
// Workflow
// --------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowViewModel {
    pub workflow: String,
    pub total: u64,
    pub steps: Vec<DenseTableViewModel>,
}
