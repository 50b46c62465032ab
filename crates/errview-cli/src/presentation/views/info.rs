use super::{CreateView, Style};
use crate::presentation::view_models::{
    DescriptorViewModel, ExplanationViewModel, IngestViewModel, SnapshotViewModel,
};
use std::fmt;

impl CreateView for ExplanationViewModel {
    fn create_view<'a>(&'a self, _style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(ExplanationView { data: self })
    }
}

struct ExplanationView<'a> {
    data: &'a ExplanationViewModel,
}

impl fmt::Display for ExplanationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Error code {}", self.data.errorcode)?;
        writeln!(f, "{}", self.data.explanations.join("\n --- \n"))
    }
}

impl CreateView for DescriptorViewModel {
    fn create_view<'a>(&'a self, _style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(DescriptorView { data: self })
    }
}

struct DescriptorView<'a> {
    data: &'a DescriptorViewModel,
}

impl fmt::Display for DescriptorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        if !data.found {
            return writeln!(f, "No metadata for workflow {}", data.workflow);
        }

        writeln!(f, "Workflow:      {}", data.workflow)?;
        writeln!(f, "Prep ID:       {}", data.prep_id.as_deref().unwrap_or("-"))?;
        writeln!(f, "Error source:  {}", data.error_source.as_deref().unwrap_or("-"))?;
        if !data.related.is_empty() {
            writeln!(f, "Related:")?;
            for related in &data.related {
                let marker = if data.acdc.contains(related) { " (ACDC)" } else { "" };
                writeln!(f, "  {}{}", related, marker)?;
            }
        }
        if !data.parameters.is_empty() {
            writeln!(f, "Parameters:")?;
            for (name, value) in &data.parameters {
                writeln!(f, "  {}: {}", name, value)?;
            }
        }
        Ok(())
    }
}

impl CreateView for IngestViewModel {
    fn create_view<'a>(&'a self, _style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(IngestView { data: self })
    }
}

struct IngestView<'a> {
    data: &'a IngestViewModel,
}

impl fmt::Display for IngestView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Store:       {}", self.data.db)?;
        writeln!(f, "Sources:     {}", self.data.sources)?;
        writeln!(f, "Inserted:    {}", self.data.inserted)?;
        writeln!(f, "Duplicates:  {}", self.data.duplicates)?;
        writeln!(
            f,
            "Store now holds {} records, {} errors",
            self.data.records, self.data.total_errors
        )
    }
}

impl CreateView for SnapshotViewModel {
    fn create_view<'a>(&'a self, _style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(SnapshotView { data: self })
    }
}

struct SnapshotView<'a> {
    data: &'a SnapshotViewModel,
}

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        writeln!(f, "Snapshot:     {}", data.key)?;
        writeln!(f, "Built at:     {}", data.created_at.as_deref().unwrap_or("-"))?;
        writeln!(f, "Records:      {}", data.records)?;
        writeln!(f, "Errors:       {}", data.total_errors)?;
        writeln!(f, "Workflows:    {}", data.workflows)?;
        writeln!(f, "Steps:        {}", data.steps)?;
        writeln!(f, "Sites:        {}", data.sites)?;
        writeln!(f, "Error codes:  {}", data.errorcodes)
    }
}
