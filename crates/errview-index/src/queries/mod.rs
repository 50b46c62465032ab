pub mod readiness;
pub mod records;
