use crate::context::ExecutionContext;
use crate::presentation::presenters::present_snapshot;
use crate::presentation::{CommandResultViewModel, Renderer, StatusBadge};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let errview = ctx.errview()?;
    let key = ctx.key();

    errview.refresh(key)?;
    let summary = errview.summary(key)?;

    let result = CommandResultViewModel::new(present_snapshot(&key.to_string(), summary))
        .with_badge(StatusBadge::success("Snapshot rebuilt"));
    ctx.renderer().render(result)
}
