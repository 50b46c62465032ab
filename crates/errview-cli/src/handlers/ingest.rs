use crate::context::ExecutionContext;
use crate::presentation::presenters::present_ingest;
use crate::presentation::{CommandResultViewModel, Renderer, StatusBadge};
use anyhow::Result;
use errview_index::ErrorStore;
use errview_runtime::{IngestProgress, IngestService};
use errview_sources::{Fetcher, SourceLocation};
use std::path::Path;

pub fn handle(ctx: &ExecutionContext, db: &Path, inputs: &[String]) -> Result<()> {
    let config = ctx.config()?;
    let fetcher = Fetcher::new(config.fetch_timeout())?;
    let mut store = ErrorStore::open(db)?;

    let renderer = ctx.renderer();
    let locations = inputs.iter().map(|s| SourceLocation::resolve(s)).collect();

    let report = IngestService::new(&fetcher, locations).run(&mut store, |progress| {
        if let IngestProgress::SourceLoaded {
            location,
            records,
            inserted,
            duplicates,
        } = progress
        {
            renderer.progress(format!(
                "{}: {} records, {} inserted, {} duplicates",
                location, records, inserted, duplicates
            ));
        }
    })?;

    let view = present_ingest(db, report, store.record_count()?, store.total_errors()?);
    let badge = if report.stats.duplicates > 0 {
        StatusBadge::warning(format!(
            "Skipped {} keys already in the store",
            report.stats.duplicates
        ))
    } else {
        StatusBadge::success(format!("Ingested {} records", report.stats.inserted))
    };

    ctx.renderer()
        .render(CommandResultViewModel::new(view).with_badge(badge))
}
