pub mod ingest;

pub use ingest::{IngestProgress, IngestReport, IngestService};
