use crate::presentation::view_models::{
    CellViewModel, DenseTableViewModel, GlobalViewModel, HeaderViewModel, PivotViewModel,
    SparseCellViewModel, SparseTableViewModel, StepTableViewModel, WorkflowViewModel,
};
use errview_engine::{DenseTable, GlobalView, HeaderTitle, SparseTable, StepTable, WorkflowView};

fn present_headers(headers: Vec<HeaderTitle>) -> Vec<HeaderViewModel> {
    headers
        .into_iter()
        .map(|h| HeaderViewModel {
            name: h.name,
            display: h.display,
            title: h.title,
        })
        .collect()
}

pub fn present_global(view: GlobalView) -> GlobalViewModel {
    let pivot = view.pivot;
    let grand_total = pivot.grand_total();

    let cells = pivot
        .cells
        .into_iter()
        .zip(pivot.titles)
        .map(|(cells, titles)| {
            cells
                .into_iter()
                .zip(titles)
                .map(|(slices, title)| CellViewModel {
                    total: slices.iter().sum(),
                    slices,
                    title,
                })
                .collect()
        })
        .collect();

    GlobalViewModel {
        split: view.split.label().to_string(),
        rows: present_headers(view.rows),
        columns: present_headers(view.columns),
        pivot: PivotViewModel {
            row_dimension: pivot.layout.rows.label().to_string(),
            col_dimension: pivot.layout.cols.label().to_string(),
            row_totals: pivot.row_totals,
            col_totals: pivot.col_totals,
            grand_total,
            cells,
        },
    }
}

pub fn present_dense_table(table: DenseTable) -> DenseTableViewModel {
    DenseTableViewModel {
        total: table.total(),
        step: table.step,
        errorcodes: table.errorcodes,
        sites: table.sites,
        rows: table.rows,
    }
}

fn present_sparse_table(table: SparseTable) -> SparseTableViewModel {
    let total = table.total();
    let cells = table
        .cells
        .into_iter()
        .flat_map(|(errorcode, sites)| {
            sites.into_iter().map(move |(site, count)| SparseCellViewModel {
                errorcode: errorcode.clone(),
                site,
                count,
            })
        })
        .collect();

    SparseTableViewModel {
        step: table.step,
        total,
        cells,
    }
}

pub fn present_step_table(table: StepTable) -> StepTableViewModel {
    match table {
        StepTable::Dense(table) => StepTableViewModel::Dense(present_dense_table(table)),
        StepTable::Sparse(table) => StepTableViewModel::Sparse(present_sparse_table(table)),
    }
}

pub fn present_workflow(view: WorkflowView) -> WorkflowViewModel {
    WorkflowViewModel {
        total: view.total(),
        workflow: view.workflow,
        steps: view.steps.into_iter().map(present_dense_table).collect(),
    }
}
