use crate::{Dimension, ErrorRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Compare two error codes.
///
/// Numeric codes sort numerically and before any non-numeric code;
/// non-numeric codes sort lexicographically. Numeric ties (`"08"` vs `"8"`)
/// fall back to the text.
pub fn compare_error_codes(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Sorted distinct values of each dimension.
///
/// The three lists are only ever built together, so they always describe the
/// same record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValues {
    pub steps: Vec<String>,
    pub sites: Vec<String>,
    pub errorcodes: Vec<String>,
}

impl DimensionValues {
    /// Build from already-distinct (but unsorted) value lists.
    pub fn from_distinct(
        mut steps: Vec<String>,
        mut sites: Vec<String>,
        mut errorcodes: Vec<String>,
    ) -> Self {
        steps.sort();
        steps.dedup();
        sites.sort();
        sites.dedup();
        errorcodes.sort_by(|a, b| compare_error_codes(a, b));
        errorcodes.dedup();

        Self {
            steps,
            sites,
            errorcodes,
        }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ErrorRecord>) -> Self {
        let mut steps = BTreeSet::new();
        let mut sites = BTreeSet::new();
        let mut errorcodes = BTreeSet::new();

        for record in records {
            steps.insert(record.step.clone());
            sites.insert(record.site.clone());
            errorcodes.insert(record.errorcode.clone());
        }

        Self::from_distinct(
            steps.into_iter().collect(),
            sites.into_iter().collect(),
            errorcodes.into_iter().collect(),
        )
    }

    pub fn get(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Step => &self.steps,
            Dimension::Site => &self.sites,
            Dimension::ErrorCode => &self.errorcodes,
        }
    }

    /// Index of `value` in the sorted list of `dimension`.
    pub fn position(&self, dimension: Dimension, value: &str) -> Option<usize> {
        self.get(dimension)
            .binary_search_by(|probe| dimension.compare(probe, value))
            .ok()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.sites.is_empty() && self.errorcodes.is_empty()
    }
}
