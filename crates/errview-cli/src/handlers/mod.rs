pub mod describe;
pub mod explain;
pub mod global;
pub mod groups;
pub mod ingest;
pub mod list;
pub mod refresh;
pub mod table;
pub mod workflow;
pub mod workflows;
