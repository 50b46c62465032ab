use crate::{ErrorRecord, compare_error_codes};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One of the three axes every error record is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "stepname")]
    Step,
    #[serde(rename = "sitename")]
    Site,
    #[serde(rename = "errorcode")]
    ErrorCode,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Step, Dimension::Site, Dimension::ErrorCode];

    /// Parse a dimension name.
    ///
    /// Accepts the column names (`stepname`, `sitename`, `errorcode`) and the
    /// short forms (`step`, `site`, `code`). Anything else falls back to
    /// `ErrorCode`, which is also the default split of the global view.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "stepname" | "step" => Dimension::Step,
            "sitename" | "site" => Dimension::Site,
            _ => Dimension::ErrorCode,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Step => "stepname",
            Dimension::Site => "sitename",
            Dimension::ErrorCode => "errorcode",
        }
    }

    /// Short label used in tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Step => "step",
            Dimension::Site => "site",
            Dimension::ErrorCode => "code",
        }
    }

    /// Ordering rule for values of this dimension.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            Dimension::ErrorCode => compare_error_codes(a, b),
            Dimension::Step | Dimension::Site => a.cmp(b),
        }
    }

    /// The record's value along this dimension.
    pub fn of<'a>(&self, record: &'a ErrorRecord) -> &'a str {
        match self {
            Dimension::Step => &record.step,
            Dimension::Site => &record.site,
            Dimension::ErrorCode => &record.errorcode,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Row, column and split ("pie") dimensions of a global pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotLayout {
    pub rows: Dimension,
    pub cols: Dimension,
    pub split: Dimension,
}

const LAYOUTS: [PivotLayout; 3] = [
    PivotLayout {
        rows: Dimension::Step,
        cols: Dimension::Site,
        split: Dimension::ErrorCode,
    },
    PivotLayout {
        rows: Dimension::Step,
        cols: Dimension::ErrorCode,
        split: Dimension::Site,
    },
    PivotLayout {
        rows: Dimension::ErrorCode,
        cols: Dimension::Site,
        split: Dimension::Step,
    },
];

impl PivotLayout {
    pub fn for_split(split: Dimension) -> Self {
        match split {
            Dimension::ErrorCode => LAYOUTS[0],
            Dimension::Site => LAYOUTS[1],
            Dimension::Step => LAYOUTS[2],
        }
    }
}

impl Default for PivotLayout {
    fn default() -> Self {
        Self::for_split(Dimension::ErrorCode)
    }
}
