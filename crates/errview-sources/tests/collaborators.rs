//! Readiness and workflow-metadata collaborators backed by local documents.

use errview_sources::{
    DEFAULT_FETCH_TIMEOUT, ErrorCounts, Fetcher, LocationMetadata, LocationReadiness,
    SiteReadinessSource, SourceLocation, WorkflowMetadata,
};
use tempfile::TempDir;

#[test]
fn test_location_readiness_reads_site_map() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("readiness.json");
    std::fs::write(&path, r#"{"T1_US_FNAL": "green", "T2_CH_CERN": "red"}"#)?;

    let source = LocationReadiness::new(
        Fetcher::new(DEFAULT_FETCH_TIMEOUT)?,
        SourceLocation::File(path),
    );
    let readiness = source.readiness()?;

    assert_eq!(readiness.len(), 2);
    assert_eq!(readiness["T2_CH_CERN"], "red");
    Ok(())
}

#[test]
fn test_location_metadata_per_workflow_documents() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::write(
        temp_dir.path().join("wf_main.json"),
        r#"{"prep_id": "TSK-001", "related": ["wf_main_ACDC0"], "parameters": {"memory": 2000}}"#,
    )?;

    let template = format!("{}/{{workflow}}.json", temp_dir.path().display());
    let metadata = LocationMetadata::new(Fetcher::new(DEFAULT_FETCH_TIMEOUT)?, template);

    let descriptor = metadata.describe("wf_main")?.expect("descriptor exists");
    assert_eq!(descriptor.workflow, "wf_main");
    assert_eq!(descriptor.prep_id.as_deref(), Some("TSK-001"));
    assert_eq!(descriptor.acdc_workflows().count(), 1);
    assert_eq!(descriptor.parameters["memory"], 2000);

    assert!(metadata.describe("wf_unknown")?.is_none());
    Ok(())
}

#[test]
fn test_counts_document_round_trip_through_fetcher() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("all_errors.json");
    std::fs::write(&path, r#"{"/wf/Task": {"50664": {"T2_US_X": 7}}}"#)?;

    let fetcher = Fetcher::new(DEFAULT_FETCH_TIMEOUT)?;
    let location = SourceLocation::File(path);
    let bytes = fetcher.fetch(&location)?;
    let counts = ErrorCounts::from_slice(&location.to_string(), &bytes)?;

    assert_eq!(counts.steps().collect::<Vec<_>>(), vec!["/wf/Task"]);
    assert_eq!(counts.records()[0].count, 7);
    Ok(())
}
