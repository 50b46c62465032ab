pub mod cache;
pub mod config;
pub mod error;
pub mod metadata;
pub mod ops;
pub mod service;
pub mod snapshot;

pub use cache::{Access, CacheKey, CacheManager, CacheState, Clock, SystemClock};
pub use config::{Config, DEFAULT_SOURCE, MAX_STALENESS_MINUTES, resolve_workspace_path};
pub use error::{Error, Result};
pub use metadata::MetadataCache;
pub use ops::{IngestProgress, IngestReport, IngestService};
pub use service::{ErrView, NO_EXPLANATION, SnapshotSummary};
pub use snapshot::{ErrorSnapshot, SnapshotBuilder, SourceSnapshotBuilder};
