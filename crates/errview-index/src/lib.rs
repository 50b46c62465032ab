// Relational error store
// One table of (step, site, errorcode, count) rows plus sorted distinct-value indexes

mod error;
mod queries;
mod records;
mod schema;
mod store;

// Public API
pub use error::{Error, Result};
pub use records::{InsertOutcome, InsertStats, RecordFilter};
pub use schema::SCHEMA_VERSION;
pub use store::{ErrorStore, StoreKind};
