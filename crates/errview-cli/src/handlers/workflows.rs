use crate::context::ExecutionContext;
use crate::presentation::presenters::present_workflow_list;
use crate::presentation::{CommandResultViewModel, Guidance, Renderer, StatusBadge};
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext) -> Result<()> {
    let errview = ctx.errview()?;
    let workflows = errview.workflows(ctx.key())?;

    let mut result = CommandResultViewModel::new(present_workflow_list(workflows));
    if result.content.workflows.is_empty() {
        result = result
            .with_badge(StatusBadge::warning("The sources hold no failures"))
            .with_suggestion(
                Guidance::new("Check which sources are loaded")
                    .with_command("errview --source <path-or-url> workflows"),
            );
    }
    ctx.renderer().render(result)
}
