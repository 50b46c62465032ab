use super::args::{Cli, Commands};
use super::context::ExecutionContext;
use super::handlers;
use super::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(
        cli.data_dir.as_deref(),
        cli.sources,
        cli.session,
        cli.format,
    )?;
    tracing::debug!(data_dir = %ctx.data_dir().display(), "workspace resolved");

    match cli.command {
        Commands::Global { split } => handlers::global::handle(&ctx, split),
        Commands::Workflow { workflow } => handlers::workflow::handle(&ctx, &workflow),
        Commands::Workflows => handlers::workflows::handle(&ctx),
        Commands::Table {
            step,
            sparse,
            readiness,
        } => handlers::table::handle(&ctx, &step, sparse, readiness),
        Commands::List { errorcode, site } => handlers::list::handle(&ctx, &errorcode, &site),
        Commands::Groups { by, key } => handlers::groups::handle(&ctx, by, key),
        Commands::Explain { errorcode } => handlers::explain::handle(&ctx, &errorcode),
        Commands::Describe { workflow } => handlers::describe::handle(&ctx, &workflow),
        Commands::Refresh => handlers::refresh::handle(&ctx),
        Commands::Ingest { db, inputs } => handlers::ingest::handle(&ctx, &db, &inputs),
    }
}
