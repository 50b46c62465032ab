// Error types
pub mod error;

// Where data comes from and how it is fetched
pub mod fetch;
pub mod location;

// Document formats
pub mod counts;
pub mod explanations;

// Collaborator interfaces
pub mod metadata;
pub mod readiness;

pub use counts::ErrorCounts;
pub use error::{Error, Result};
pub use explanations::Explanations;
pub use fetch::{DEFAULT_FETCH_TIMEOUT, Fetcher};
pub use location::SourceLocation;
pub use metadata::{LocationMetadata, WorkflowMetadata};
pub use readiness::{LocationReadiness, SiteReadinessSource, StaticReadiness};
