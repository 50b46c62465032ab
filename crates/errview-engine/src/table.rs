use errview_index::{ErrorStore, RecordFilter, Result};
use errview_types::{ErrorRecord, compare_error_codes};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    #[default]
    Dense,
    Sparse,
}

/// Every cell of one step: a row per error code, a column per site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenseTable {
    pub step: String,
    pub errorcodes: Vec<String>,
    pub sites: Vec<String>,
    pub rows: Vec<Vec<u64>>,
}

impl DenseTable {
    pub fn total(&self) -> u64 {
        self.rows.iter().flatten().sum()
    }

    pub fn get(&self, errorcode: &str, site: &str) -> Option<u64> {
        let row = self.errorcodes.iter().position(|c| c == errorcode)?;
        let col = self.sites.iter().position(|s| s == site)?;
        Some(self.rows[row][col])
    }

    /// The non-zero cells, keyed like a sparse table.
    pub fn non_zero(&self) -> SparseCells {
        let mut cells = SparseCells::new();
        for (errorcode, row) in self.errorcodes.iter().zip(&self.rows) {
            for (site, count) in self.sites.iter().zip(row) {
                if *count > 0 {
                    cells
                        .entry(errorcode.clone())
                        .or_default()
                        .insert(site.clone(), *count);
                }
            }
        }
        cells
    }
}

/// `errorcode -> site -> count`, non-zero cells only.
pub type SparseCells = BTreeMap<String, BTreeMap<String, u64>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparseTable {
    pub step: String,
    pub cells: SparseCells,
}

impl SparseTable {
    pub fn total(&self) -> u64 {
        self.cells.values().flat_map(|sites| sites.values()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StepTable {
    Dense(DenseTable),
    Sparse(SparseTable),
}

impl StepTable {
    pub fn total(&self) -> u64 {
        match self {
            StepTable::Dense(table) => table.total(),
            StepTable::Sparse(table) => table.total(),
        }
    }
}

/// Error table of one step.
///
/// With `readiness`, only sites classified as one of the given values are
/// kept (and, for dense tables, only they make up the site axis).
pub fn step_table(
    store: &ErrorStore,
    step: &str,
    mode: TableMode,
    readiness: Option<&[String]>,
) -> Result<StepTable> {
    match mode {
        TableMode::Dense => dense_step_table(store, step, readiness).map(StepTable::Dense),
        TableMode::Sparse => sparse_step_table(store, step, readiness).map(StepTable::Sparse),
    }
}

pub fn dense_step_table(
    store: &ErrorStore,
    step: &str,
    readiness: Option<&[String]>,
) -> Result<DenseTable> {
    let mut filter = RecordFilter::step(step);
    let sites = match readiness {
        Some(classes) => {
            filter = filter.with_readiness(classes.to_vec());
            store.sites_with_readiness(classes)?
        }
        None => store.values().sites.clone(),
    };
    let errorcodes = store.values().errorcodes.clone();

    let records = store.records(&filter)?;
    let rows = merge_walk(&records, &errorcodes, &sites);

    Ok(DenseTable {
        step: step.to_string(),
        errorcodes,
        sites,
        rows,
    })
}

pub fn sparse_step_table(
    store: &ErrorStore,
    step: &str,
    readiness: Option<&[String]>,
) -> Result<SparseTable> {
    let mut filter = RecordFilter::step(step);
    if let Some(classes) = readiness {
        filter = filter.with_readiness(classes.to_vec());
    }

    let mut cells = SparseCells::new();
    for record in store.records(&filter)? {
        if record.count == 0 {
            continue;
        }
        *cells
            .entry(record.errorcode)
            .or_default()
            .entry(record.site)
            .or_default() += record.count;
    }

    Ok(SparseTable {
        step: step.to_string(),
        cells,
    })
}

/// Fill the `errorcodes x sites` grid from records sorted by (errorcode, site).
///
/// Both axes and the record stream share one ordering, so a single forward
/// pass suffices: a cell with no matching record is zero, repeated keys are
/// summed, and records whose key is not on the axes are skipped.
fn merge_walk(records: &[ErrorRecord], errorcodes: &[String], sites: &[String]) -> Vec<Vec<u64>> {
    let mut pending = records.iter().peekable();
    let mut rows = Vec::with_capacity(errorcodes.len());

    for errorcode in errorcodes {
        let mut row = Vec::with_capacity(sites.len());

        for site in sites {
            let mut cell = 0;
            while let Some(record) = pending.peek() {
                let order = compare_error_codes(&record.errorcode, errorcode)
                    .then_with(|| record.site.cmp(site));
                match order {
                    Ordering::Less => {
                        pending.next();
                    }
                    Ordering::Equal => {
                        cell += record.count;
                        pending.next();
                    }
                    Ordering::Greater => break,
                }
            }
            row.push(cell);
        }

        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(errorcode: &str, site: &str, count: u64) -> ErrorRecord {
        ErrorRecord::new("/A/Step1", site, errorcode, count)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_merge_walk_zero_fills_gaps() {
        let records = vec![record("134", "T2_B", 4), record("8020", "T2_A", 5)];
        let rows = merge_walk(
            &records,
            &strings(&["134", "8020"]),
            &strings(&["T2_A", "T2_B"]),
        );
        assert_eq!(rows, vec![vec![0, 4], vec![5, 0]]);
    }

    #[test]
    fn test_merge_walk_sums_repeated_keys() {
        let records = vec![record("8020", "T2_A", 5), record("8020", "T2_A", 5)];
        let rows = merge_walk(&records, &strings(&["8020"]), &strings(&["T2_A"]));
        assert_eq!(rows, vec![vec![10]]);
    }

    #[test]
    fn test_merge_walk_skips_keys_off_the_axes() {
        let records = vec![
            record("134", "T2_A", 1),
            record("134", "T2_C", 7),
            record("8020", "T2_A", 2),
        ];
        let rows = merge_walk(
            &records,
            &strings(&["134", "8020"]),
            &strings(&["T2_A", "T2_B"]),
        );
        assert_eq!(rows, vec![vec![1, 0], vec![2, 0]]);
    }

    #[test]
    fn test_merge_walk_numeric_code_order() {
        let records = vec![record("9", "T2_A", 1), record("10", "T2_A", 2)];
        let rows = merge_walk(&records, &strings(&["9", "10"]), &strings(&["T2_A"]));
        assert_eq!(rows, vec![vec![1], vec![2]]);
    }
}
