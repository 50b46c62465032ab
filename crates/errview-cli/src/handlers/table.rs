use crate::context::ExecutionContext;
use crate::presentation::presenters::present_step_table;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::{Result, bail};
use errview_engine::TableMode;

pub fn handle(
    ctx: &ExecutionContext,
    step: &str,
    sparse: bool,
    readiness: Vec<String>,
) -> Result<()> {
    let errview = ctx.errview()?;

    if !errview.values(ctx.key())?.steps.iter().any(|s| s == step) {
        bail!("Step '{}' not found in the source data", step);
    }

    let mode = if sparse {
        TableMode::Sparse
    } else {
        TableMode::Dense
    };
    let readiness = (!readiness.is_empty()).then_some(readiness.as_slice());
    let table = errview.step_table(ctx.key(), step, mode, readiness)?;

    let result = CommandResultViewModel::new(present_step_table(table));
    ctx.renderer().render(result)
}
