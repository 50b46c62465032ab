// NOTE: errview Architecture Rationale
//
// Why rebuild from the source on every process (not keep a database)?
// - The production report is regenerated upstream; a local copy only goes stale
// - Ingesting a full report into an in-memory store takes well under a second
// - Trade-off: every invocation pays one fetch, `ingest --db` covers offline use
//
// Why one snapshot per cache key (not one per command)?
// - A page of views (global pivot, workflow tables, drill-downs) must agree
// - Views read through the cache manager, so they all see the same records
// - Trade-off: data is up to `staleness_minutes` old in long-lived consumers
//
// Why JSON envelopes on stdout and logs on stderr?
// - `--format json` output is piped into other tools; stray log lines would break it
// - `{"content": ...}` leaves room for status fields without changing consumers

mod args;
mod commands;
pub mod context;
mod handlers;
mod logging;
pub mod presentation;

pub use args::{Cli, Commands, DimensionArg, GroupKeyArg, LogLevel, OutputFormat};
pub use commands::run;
