use super::count_cell;
use crate::presentation::views::Style;
use owo_colors::OwoColorize;
use std::fmt;

/// Count matrix with a header row, a trailing total column and a total row.
pub struct Grid<'a> {
    pub corner: &'a str,
    pub columns: &'a [String],
    pub rows: Vec<(&'a str, &'a [u64])>,
    pub style: Style,
}

impl Grid<'_> {
    fn col_totals(&self) -> Vec<u64> {
        let mut totals = vec![0; self.columns.len()];
        for (_, counts) in &self.rows {
            for (total, count) in totals.iter_mut().zip(counts.iter()) {
                *total += count;
            }
        }
        totals
    }
}

fn digits(n: u64) -> usize {
    n.to_string().len()
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let col_totals = self.col_totals();
        let grand_total: u64 = col_totals.iter().sum();

        let label_width = self
            .rows
            .iter()
            .map(|(label, _)| label.len())
            .chain([self.corner.len(), "total".len()])
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&col_totals)
            .map(|(name, total)| name.len().max(digits(*total)))
            .collect();
        let total_width = "total".len().max(digits(grand_total));

        let header = format!("{:<label_width$}", self.corner);
        write!(f, "{}", if self.style.color { header.bold().to_string() } else { header })?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", name)?;
        }
        writeln!(f, "  {:>total_width$}", "total")?;

        for (label, counts) in &self.rows {
            write!(f, "{:<label_width$}", label)?;
            for (count, width) in counts.iter().zip(&widths) {
                write!(f, "  {}", count_cell(*count, *width, self.style))?;
            }
            writeln!(f, "  {:>total_width$}", counts.iter().sum::<u64>())?;
        }

        write!(f, "{:<label_width$}", "total")?;
        for (total, width) in col_totals.iter().zip(&widths) {
            write!(f, "  {:>width$}", total)?;
        }
        writeln!(f, "  {:>total_width$}", grand_total)
    }
}
