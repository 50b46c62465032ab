use crate::context::ExecutionContext;
use crate::presentation::presenters::present_descriptor;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, workflow: &str) -> Result<()> {
    let errview = ctx.errview()?;
    let descriptor = errview.describe(workflow)?;

    let result = CommandResultViewModel::new(present_descriptor(workflow, descriptor));
    ctx.renderer().render(result)
}
