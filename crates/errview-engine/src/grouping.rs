use errview_index::{ErrorStore, RecordFilter, Result};
use errview_types::{Dimension, PivotLayout, workflow_of};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `row -> col -> count`.
pub type ErrorCells = BTreeMap<String, BTreeMap<String, u64>>;

/// One entry of a grouped roll-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorGroup {
    pub errors: ErrorCells,
    pub total: u64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub subgroups: BTreeMap<String, ErrorGroup>,
    #[serde(flatten)]
    pub decorations: BTreeMap<String, serde_json::Value>,
}

impl ErrorGroup {
    pub fn add_cell(&mut self, row: &str, col: &str, count: u64) {
        *self
            .errors
            .entry(row.to_string())
            .or_default()
            .entry(col.to_string())
            .or_default() += count;
        self.total += count;
    }

    /// Sum another group's cells and total into this one.
    pub fn absorb(&mut self, other: &ErrorGroup) {
        for (row, cols) in &other.errors {
            let target = self.errors.entry(row.clone()).or_default();
            for (col, count) in cols {
                *target.entry(col.clone()).or_default() += count;
            }
        }
        self.total += other.total;
    }
}

pub type DecoratorFn = Box<dyn Fn(&str, &ErrorGroup) -> serde_json::Value>;

/// Named per-group annotation, run once for each group after folding.
pub struct Decorator {
    pub name: String,
    decorate: DecoratorFn,
}

impl Decorator {
    pub fn new(
        name: impl Into<String>,
        decorate: impl Fn(&str, &ErrorGroup) -> serde_json::Value + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            decorate: Box::new(decorate),
        }
    }

    pub fn apply(&self, key: &str, group: &ErrorGroup) -> serde_json::Value {
        (self.decorate)(key, group)
    }
}

impl std::fmt::Debug for Decorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decorator").field("name", &self.name).finish()
    }
}

/// Fold `entries` into groups keyed by `group_fn(name)`.
///
/// Cells and totals are summed, never overwritten. Every folded entry is kept
/// under `subgroups` by its original name.
pub fn group_errors<F>(
    entries: &BTreeMap<String, ErrorGroup>,
    group_fn: F,
    decorators: &[Decorator],
) -> BTreeMap<String, ErrorGroup>
where
    F: Fn(&str) -> String,
{
    let mut groups: BTreeMap<String, ErrorGroup> = BTreeMap::new();

    for (name, entry) in entries {
        let group = groups.entry(group_fn(name)).or_default();
        group.absorb(entry);
        group.subgroups.insert(name.clone(), entry.clone());
    }

    for (key, group) in groups.iter_mut() {
        for decorator in decorators {
            let value = decorator.apply(key, group);
            group.decorations.insert(decorator.name.clone(), value);
        }
    }

    groups
}

/// Finest grouping entries: one per value of `key`, with the other two
/// dimensions as rows and columns (the pivot layout that splits by `key`).
pub fn leaf_entries(store: &ErrorStore, key: Dimension) -> Result<BTreeMap<String, ErrorGroup>> {
    let layout = PivotLayout::for_split(key);
    let mut entries: BTreeMap<String, ErrorGroup> = BTreeMap::new();

    for record in store.records(&RecordFilter::all())? {
        if record.count == 0 {
            continue;
        }
        entries
            .entry(key.of(&record).to_string())
            .or_default()
            .add_cell(
                layout.rows.of(&record),
                layout.cols.of(&record),
                record.count,
            );
    }

    Ok(entries)
}

/// Stock key-derivation functions for `group_errors`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    /// The name itself.
    #[default]
    Value,
    /// Workflow ID of a step name; other names pass through.
    Workflow,
    /// Site tier, the prefix before the first `_` (`T2_US_X` -> `T2`).
    Tier,
}

impl GroupKey {
    pub fn apply(&self, name: &str) -> String {
        match self {
            GroupKey::Value => name.to_string(),
            GroupKey::Workflow => workflow_of(name).unwrap_or(name).to_string(),
            GroupKey::Tier => name.split('_').next().unwrap_or(name).to_string(),
        }
    }
}
