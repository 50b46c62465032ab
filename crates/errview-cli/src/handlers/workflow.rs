use crate::context::ExecutionContext;
use crate::presentation::presenters::present_workflow;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::{Result, bail};

pub fn handle(ctx: &ExecutionContext, workflow: &str) -> Result<()> {
    let errview = ctx.errview()?;
    let Some(view) = errview.workflow(ctx.key(), workflow)? else {
        bail!("Workflow '{}' not found in the source data", workflow);
    };

    let result = CommandResultViewModel::new(present_workflow(view));
    ctx.renderer().render(result)
}
