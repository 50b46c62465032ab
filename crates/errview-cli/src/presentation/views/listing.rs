use super::{CreateView, Style};
use crate::presentation::view_models::{
    GroupListViewModel, WorkflowListViewModel, WorkflowMatchListViewModel,
};
use owo_colors::OwoColorize;
use std::fmt;

impl CreateView for WorkflowListViewModel {
    fn create_view<'a>(&'a self, _style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(WorkflowListView { data: self })
    }
}

struct WorkflowListView<'a> {
    data: &'a WorkflowListViewModel,
}

impl fmt::Display for WorkflowListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.workflows.is_empty() {
            return writeln!(f, "No workflows found.");
        }
        for workflow in &self.data.workflows {
            writeln!(f, "{}", workflow)?;
        }
        Ok(())
    }
}

impl CreateView for WorkflowMatchListViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(WorkflowMatchListView { data: self, style })
    }
}

struct WorkflowMatchListView<'a> {
    data: &'a WorkflowMatchListViewModel,
    style: Style,
}

impl fmt::Display for WorkflowMatchListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Error {} at {}: {} errors in {} workflows",
            self.data.errorcode,
            self.data.site,
            self.data.total,
            self.data.workflows.len()
        )?;

        let width = self
            .data
            .workflows
            .iter()
            .map(|w| w.count.to_string().len())
            .max()
            .unwrap_or(0);
        for workflow in &self.data.workflows {
            let count = format!("{:>width$}", workflow.count);
            writeln!(
                f,
                "  {}  {}",
                if self.style.color { count.red().to_string() } else { count },
                workflow.workflow
            )?;
            for step in &workflow.steps {
                writeln!(f, "  {:>width$}    {}", "", step)?;
            }
        }
        Ok(())
    }
}

impl CreateView for GroupListViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(GroupListView { data: self, style })
    }
}

struct GroupListView<'a> {
    data: &'a GroupListViewModel,
    style: Style,
}

impl fmt::Display for GroupListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} errors, {} values grouped by {} ({} groups)",
            self.data.total,
            self.data.by,
            self.data.key,
            self.data.groups.len()
        )?;

        for group in &self.data.groups {
            let name = format!("{} ({})", group.name, group.total);
            writeln!(
                f,
                "{}",
                if self.style.color { name.bold().to_string() } else { name }
            )?;
            for member in &group.members {
                writeln!(f, "  {} ({})", member.name, member.total)?;
            }
        }
        Ok(())
    }
}
