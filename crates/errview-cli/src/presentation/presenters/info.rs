use crate::presentation::view_models::{
    DescriptorViewModel, ExplanationViewModel, IngestViewModel, SnapshotViewModel,
};
use chrono::SecondsFormat;
use errview_runtime::{IngestReport, SnapshotSummary};
use errview_types::WorkflowDescriptor;
use std::path::Path;

pub fn present_explanation(errorcode: &str, explanations: Vec<String>) -> ExplanationViewModel {
    ExplanationViewModel {
        errorcode: errorcode.to_string(),
        explanations,
    }
}

pub fn present_descriptor(
    workflow: &str,
    descriptor: Option<WorkflowDescriptor>,
) -> DescriptorViewModel {
    let Some(descriptor) = descriptor else {
        return DescriptorViewModel {
            workflow: workflow.to_string(),
            found: false,
            prep_id: None,
            related: Vec::new(),
            acdc: Vec::new(),
            error_source: None,
            parameters: Default::default(),
        };
    };

    DescriptorViewModel {
        workflow: workflow.to_string(),
        found: true,
        acdc: descriptor.acdc_workflows().map(str::to_string).collect(),
        prep_id: descriptor.prep_id,
        related: descriptor.related,
        error_source: descriptor.error_source,
        parameters: descriptor.parameters,
    }
}

pub fn present_ingest(
    db: &Path,
    report: IngestReport,
    records: usize,
    total_errors: u64,
) -> IngestViewModel {
    IngestViewModel {
        db: db.display().to_string(),
        sources: report.sources,
        inserted: report.stats.inserted,
        duplicates: report.stats.duplicates,
        records,
        total_errors,
    }
}

pub fn present_snapshot(key: &str, summary: SnapshotSummary) -> SnapshotViewModel {
    SnapshotViewModel {
        key: key.to_string(),
        records: summary.records,
        total_errors: summary.total_errors,
        workflows: summary.workflows,
        steps: summary.steps,
        sites: summary.sites,
        errorcodes: summary.errorcodes,
        created_at: summary
            .created_at
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    }
}
