pub mod dimension;
pub mod record;
pub mod session;
pub mod values;
pub mod workflow;

pub use dimension::{Dimension, PivotLayout};
pub use record::{ErrorRecord, SiteReadinessMap};
pub use session::SessionId;
pub use values::{DimensionValues, compare_error_codes};
pub use workflow::{WorkflowDescriptor, is_acdc_workflow, workflow_of};
