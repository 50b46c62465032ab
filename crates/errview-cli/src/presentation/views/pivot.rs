use super::{CreateView, Style};
use crate::presentation::formatters::Grid;
use crate::presentation::view_models::{
    DenseTableViewModel, GlobalViewModel, SparseTableViewModel, StepTableViewModel,
    WorkflowViewModel,
};
use owo_colors::OwoColorize;
use std::fmt;

fn heading(f: &mut fmt::Formatter, text: &str, style: Style) -> fmt::Result {
    if style.color {
        writeln!(f, "{}", text.bold())
    } else {
        writeln!(f, "{}", text)
    }
}

// --------------------------------------------------------
// Global pivot
// --------------------------------------------------------

impl CreateView for GlobalViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(GlobalView { data: self, style })
    }
}

struct GlobalView<'a> {
    data: &'a GlobalViewModel,
    style: Style,
}

impl fmt::Display for GlobalView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pivot = &self.data.pivot;
        heading(
            f,
            &format!(
                "{} errors: {} by {}, split by {}",
                pivot.grand_total, pivot.row_dimension, pivot.col_dimension, self.data.split
            ),
            self.style,
        )?;

        if pivot.grand_total == 0 {
            return writeln!(f, "No errors.");
        }
        writeln!(f)?;

        let columns: Vec<String> = self.data.columns.iter().map(|c| c.name.clone()).collect();
        let totals: Vec<Vec<u64>> = pivot
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.total).collect())
            .collect();

        let grid = Grid {
            corner: &pivot.row_dimension,
            columns: &columns,
            rows: self
                .data
                .rows
                .iter()
                .zip(&totals)
                .map(|(header, counts)| (header.name.as_str(), counts.as_slice()))
                .collect(),
            style: self.style,
        };
        write!(f, "{}", grid)
    }
}

// --------------------------------------------------------
// Step tables
// --------------------------------------------------------

/// Dense table with all-zero error codes and sites left out.
struct DenseGrid<'a> {
    data: &'a DenseTableViewModel,
    style: Style,
}

impl fmt::Display for DenseGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let table = self.data;
        if table.total == 0 {
            return writeln!(f, "No errors.");
        }

        let keep_cols: Vec<usize> = (0..table.sites.len())
            .filter(|&col| table.rows.iter().any(|row| row[col] > 0))
            .collect();
        let columns: Vec<String> = keep_cols.iter().map(|&col| table.sites[col].clone()).collect();
        let kept_rows: Vec<(&str, Vec<u64>)> = table
            .errorcodes
            .iter()
            .zip(&table.rows)
            .filter(|(_, row)| row.iter().any(|&count| count > 0))
            .map(|(code, row)| {
                (
                    code.as_str(),
                    keep_cols.iter().map(|&col| row[col]).collect(),
                )
            })
            .collect();

        let grid = Grid {
            corner: "code",
            columns: &columns,
            rows: kept_rows
                .iter()
                .map(|(code, counts)| (*code, counts.as_slice()))
                .collect(),
            style: self.style,
        };
        write!(f, "{}", grid)
    }
}

struct SparseList<'a> {
    data: &'a SparseTableViewModel,
    style: Style,
}

impl fmt::Display for SparseList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.cells.is_empty() {
            return writeln!(f, "No errors.");
        }

        let code_width = self.data.cells.iter().map(|c| c.errorcode.len()).max().unwrap_or(0);
        let site_width = self.data.cells.iter().map(|c| c.site.len()).max().unwrap_or(0);
        for cell in &self.data.cells {
            let count = cell.count.to_string();
            writeln!(
                f,
                "{:<code_width$}  {:<site_width$}  {}",
                cell.errorcode,
                cell.site,
                if self.style.color { count.red().to_string() } else { count }
            )?;
        }
        Ok(())
    }
}

impl CreateView for StepTableViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(StepTableView { data: self, style })
    }
}

struct StepTableView<'a> {
    data: &'a StepTableViewModel,
    style: Style,
}

impl fmt::Display for StepTableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.data {
            StepTableViewModel::Dense(table) => {
                heading(f, &format!("{} ({} errors)", table.step, table.total), self.style)?;
                write!(f, "{}", DenseGrid { data: table, style: self.style })
            }
            StepTableViewModel::Sparse(table) => {
                heading(f, &format!("{} ({} errors)", table.step, table.total), self.style)?;
                write!(f, "{}", SparseList { data: table, style: self.style })
            }
        }
    }
}

// --------------------------------------------------------
// Workflow
// --------------------------------------------------------

impl CreateView for WorkflowViewModel {
    fn create_view<'a>(&'a self, style: Style) -> Box<dyn fmt::Display + 'a> {
        Box::new(WorkflowView { data: self, style })
    }
}

struct WorkflowView<'a> {
    data: &'a WorkflowViewModel,
    style: Style,
}

impl fmt::Display for WorkflowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        heading(
            f,
            &format!(
                "Workflow {}: {} steps, {} errors",
                self.data.workflow,
                self.data.steps.len(),
                self.data.total
            ),
            self.style,
        )?;

        for table in &self.data.steps {
            writeln!(f)?;
            writeln!(f, "{} ({} errors)", table.step, table.total)?;
            write!(f, "{}", DenseGrid { data: table, style: self.style })?;
        }
        Ok(())
    }
}
