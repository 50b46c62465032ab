use crate::args::{DimensionArg, GroupKeyArg};
use crate::context::ExecutionContext;
use crate::presentation::presenters::present_groups;
use crate::presentation::{CommandResultViewModel, Renderer};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, by: DimensionArg, key: GroupKeyArg) -> Result<()> {
    let errview = ctx.errview()?;
    let groups = errview.groups(ctx.key(), by.into(), key.into())?;

    let result = CommandResultViewModel::new(present_groups(
        &by.to_string(),
        &key.to_string(),
        groups,
    ));
    ctx.renderer().render(result)
}
