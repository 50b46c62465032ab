use crate::context::ExecutionContext;
use crate::presentation::presenters::present_global;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::Result;
use errview_types::Dimension;

pub fn handle(ctx: &ExecutionContext, split: Dimension) -> Result<()> {
    let errview = ctx.errview()?;
    let view = errview.global(ctx.key(), split)?;

    let result = CommandResultViewModel::new(present_global(view));
    ctx.renderer().render(result)
}
