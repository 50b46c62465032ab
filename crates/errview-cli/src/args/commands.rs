use super::enums::{DimensionArg, GroupKeyArg};
use clap::Subcommand;
use errview_types::Dimension;
use std::convert::Infallible;
use std::path::PathBuf;

/// Any split name is accepted; unknown names pivot by error code.
fn parse_split(name: &str) -> Result<Dimension, Infallible> {
    Ok(Dimension::parse(name))
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Pivot every error by two dimensions, split by the third")]
    Global {
        /// Dimension listed inside each cell: errorcode, site or step
        #[arg(long, default_value = "errorcode", value_parser = parse_split)]
        split: Dimension,
    },

    #[command(about = "Show an error-code by site table for every step of a workflow")]
    Workflow {
        /// Workflow ID (the first segment of its step names)
        workflow: String,
    },

    #[command(about = "List the workflows present in the source data")]
    Workflows,

    #[command(about = "Show the error-code by site table of one step")]
    Table {
        /// Full step name, e.g. /wf/Task
        step: String,

        /// Only list non-zero cells
        #[arg(long)]
        sparse: bool,

        /// Restrict sites to these readiness classes
        #[arg(long = "readiness")]
        readiness: Vec<String>,
    },

    #[command(about = "List workflows failing with an error code at a site")]
    List {
        #[arg(long, allow_hyphen_values = true)]
        errorcode: String,

        #[arg(long)]
        site: String,
    },

    #[command(about = "Group error tables by a dimension")]
    Groups {
        /// Dimension whose values become leaf groups
        #[arg(long, default_value = "step")]
        by: DimensionArg,

        /// How leaf names fold into groups
        #[arg(long, default_value = "workflow")]
        key: GroupKeyArg,
    },

    #[command(about = "Show the known log snippets for an error code")]
    Explain {
        #[arg(allow_hyphen_values = true)]
        errorcode: String,
    },

    #[command(about = "Show the metadata descriptor of a workflow")]
    Describe { workflow: String },

    #[command(about = "Rebuild the snapshot from the sources and summarize it")]
    Refresh,

    #[command(about = "Load sources into a persisted store, skipping duplicate keys")]
    Ingest {
        /// Store file (created when missing)
        #[arg(long)]
        db: PathBuf,

        /// Sources to load, in order
        #[arg(required = true, value_name = "SOURCES")]
        inputs: Vec<String>,
    },
}
