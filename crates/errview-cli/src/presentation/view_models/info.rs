use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationViewModel {
    pub errorcode: String,
    pub explanations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptorViewModel {
    pub workflow: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_id: Option<String>,
    pub related: Vec<String>,
    pub acdc: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_source: Option<String>,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestViewModel {
    pub db: String,
    pub sources: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub records: usize,
    pub total_errors: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotViewModel {
    pub key: String,
    pub records: usize,
    pub total_errors: u64,
    pub workflows: usize,
    pub steps: usize,
    pub sites: usize,
    pub errorcodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}
