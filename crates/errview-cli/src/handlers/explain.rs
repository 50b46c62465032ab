use crate::context::ExecutionContext;
use crate::presentation::presenters::present_explanation;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, errorcode: &str) -> Result<()> {
    let errview = ctx.errview()?;
    let explanations = errview.explain(ctx.key(), errorcode)?;

    let result = CommandResultViewModel::new(present_explanation(errorcode, explanations));
    ctx.renderer().render(result)
}
