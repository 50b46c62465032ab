use crate::context::ExecutionContext;
use crate::presentation::presenters::present_workflow_matches;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, errorcode: &str, site: &str) -> Result<()> {
    let errview = ctx.errview()?;
    let matches = errview.workflows_matching(ctx.key(), errorcode, site)?;

    let mut result =
        CommandResultViewModel::new(present_workflow_matches(errorcode, site, matches));
    if result.content.workflows.is_empty() {
        result = result.with_suggestion(
            Guidance::new("See which codes fail at which sites")
                .with_command("errview global --split step"),
        );
    }
    ctx.renderer().render(result)
}
