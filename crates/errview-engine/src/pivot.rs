use errview_index::{ErrorStore, RecordFilter, Result};
use errview_types::{Dimension, PivotLayout, workflow_of};
use serde::Serialize;
use std::collections::HashMap;

/// Global pivot of the whole store.
///
/// `cells[row][col]` holds the non-zero counts of the split dimension at
/// that intersection, in split-dimension order. `titles` mirrors `cells`
/// with a tooltip for each intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotResult {
    pub layout: PivotLayout,
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    pub row_totals: Vec<u64>,
    pub col_totals: Vec<u64>,
    pub cells: Vec<Vec<Vec<u64>>>,
    pub titles: Vec<Vec<String>>,
}

impl PivotResult {
    pub fn grand_total(&self) -> u64 {
        self.row_totals.iter().sum()
    }

    /// Slice list at a named intersection.
    pub fn cell(&self, row: &str, col: &str) -> Option<&[u64]> {
        let irow = self.rows.iter().position(|r| r == row)?;
        let icol = self.cols.iter().position(|c| c == col)?;
        Some(&self.cells[irow][icol])
    }

    pub fn title(&self, row: &str, col: &str) -> Option<&str> {
        let irow = self.rows.iter().position(|r| r == row)?;
        let icol = self.cols.iter().position(|c| c == col)?;
        Some(&self.titles[irow][icol])
    }
}

/// Pivot every record by the fixed layout for `split`.
pub fn global_pivot(store: &ErrorStore, split: Dimension) -> Result<PivotResult> {
    let layout = PivotLayout::for_split(split);
    let values = store.values();
    let rows = values.get(layout.rows).to_vec();
    let cols = values.get(layout.cols).to_vec();

    // Records arrive sorted by (errorcode, site, step). Within one
    // intersection two of those are fixed, so the slices come out in
    // split-dimension order without a second sort.
    let mut slices: HashMap<(usize, usize), Vec<(String, u64)>> = HashMap::new();
    for record in store.records(&RecordFilter::all())? {
        if record.count == 0 {
            continue;
        }
        let (Some(irow), Some(icol)) = (
            values.position(layout.rows, layout.rows.of(&record)),
            values.position(layout.cols, layout.cols.of(&record)),
        ) else {
            continue;
        };
        slices
            .entry((irow, icol))
            .or_default()
            .push((layout.split.of(&record).to_string(), record.count));
    }

    let mut row_totals = vec![0; rows.len()];
    let mut col_totals = vec![0; cols.len()];
    let mut cells = Vec::with_capacity(rows.len());
    let mut titles = Vec::with_capacity(rows.len());

    for (irow, row) in rows.iter().enumerate() {
        let mut cell_row = Vec::with_capacity(cols.len());
        let mut title_row = Vec::with_capacity(cols.len());

        for (icol, col) in cols.iter().enumerate() {
            let slice = slices.remove(&(irow, icol)).unwrap_or_default();
            let sum: u64 = slice.iter().map(|(_, count)| count).sum();
            row_totals[irow] += sum;
            col_totals[icol] += sum;

            title_row.push(cell_title(&layout, row, col, sum, &slice));
            cell_row.push(slice.into_iter().map(|(_, count)| count).collect());
        }

        cells.push(cell_row);
        titles.push(title_row);
    }

    Ok(PivotResult {
        layout,
        rows,
        cols,
        row_totals,
        col_totals,
        cells,
        titles,
    })
}

fn cell_title(
    layout: &PivotLayout,
    row: &str,
    col: &str,
    total: u64,
    slice: &[(String, u64)],
) -> String {
    let mut title = format!("Total Errors: {}\n", total);
    if layout.rows != Dimension::Step {
        title.push_str(&format!("{}: {}\n", layout.rows.label(), row));
    }
    title.push_str(&format!("{}: {}", layout.cols.label(), col));

    for (key, count) in slice {
        let key = match layout.split {
            Dimension::Step => workflow_of(key).unwrap_or(key.as_str()),
            _ => key.as_str(),
        };
        title.push_str(&format!("\n{} {}: {}", layout.split.label(), key, count));
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_skips_step_rows() {
        let layout = PivotLayout::for_split(Dimension::ErrorCode);
        let title = cell_title(
            &layout,
            "/A/Step1",
            "T2_US_X",
            8,
            &[("134".to_string(), 3), ("8020".to_string(), 5)],
        );
        assert_eq!(
            title,
            "Total Errors: 8\nsite: T2_US_X\ncode 134: 3\ncode 8020: 5"
        );
    }

    #[test]
    fn test_title_step_slices_show_workflow() {
        let layout = PivotLayout::for_split(Dimension::Step);
        let title = cell_title(
            &layout,
            "8020",
            "T2_US_X",
            5,
            &[("/A/Step1".to_string(), 5)],
        );
        assert_eq!(title, "Total Errors: 5\ncode: 8020\nsite: T2_US_X\nstep A: 5");
    }

    #[test]
    fn test_empty_intersection_title() {
        let layout = PivotLayout::for_split(Dimension::Site);
        let title = cell_title(&layout, "/A/Step1", "134", 0, &[]);
        assert_eq!(title, "Total Errors: 0\ncode: 134");
    }
}
