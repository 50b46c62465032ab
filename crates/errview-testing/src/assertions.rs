//! Custom assertions for errview-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - Workflow list validation
//! - Pivot total consistency
//! - Step table cell checks

use anyhow::{Context, Result};
use serde_json::Value;

fn totals(json: &Value, field: &str) -> Result<Vec<u64>> {
    json["content"]["pivot"][field]
        .as_array()
        .with_context(|| format!("Expected 'content.pivot.{}' array in JSON", field))?
        .iter()
        .map(|v| v.as_u64().context("Expected non-negative integer total"))
        .collect()
}

/// Assert that `workflows` output lists exactly `expected`, in order.
pub fn assert_workflows(json: &Value, expected: &[&str]) -> Result<()> {
    let workflows: Vec<&str> = json["content"]["workflows"]
        .as_array()
        .context("Expected 'content.workflows' array in JSON")?
        .iter()
        .filter_map(Value::as_str)
        .collect();

    if workflows != expected {
        anyhow::bail!("Expected workflows {:?}, got {:?}", expected, workflows);
    }

    Ok(())
}

/// Assert that a `global` pivot's row and column totals both sum to `expected`.
pub fn assert_grand_total(json: &Value, expected: u64) -> Result<()> {
    let rows: u64 = totals(json, "row_totals")?.iter().sum();
    let cols: u64 = totals(json, "col_totals")?.iter().sum();

    if rows != expected {
        anyhow::bail!("Row totals sum to {}, expected {}", rows, expected);
    }
    if cols != expected {
        anyhow::bail!("Column totals sum to {}, expected {}", cols, expected);
    }

    Ok(())
}

/// Assert one cell of a dense `table` output.
pub fn assert_dense_cell(json: &Value, errorcode: &str, site: &str, expected: u64) -> Result<()> {
    let content = &json["content"];
    let position = |axis: &str, value: &str| -> Result<usize> {
        content[axis]
            .as_array()
            .with_context(|| format!("Expected 'content.{}' array in JSON", axis))?
            .iter()
            .position(|v| v.as_str() == Some(value))
            .with_context(|| format!("'{}' not found in content.{}", value, axis))
    };

    let row = position("errorcodes", errorcode)?;
    let col = position("sites", site)?;
    let actual = content["rows"][row][col]
        .as_u64()
        .with_context(|| format!("Missing cell ({}, {})", errorcode, site))?;

    if actual != expected {
        anyhow::bail!(
            "Cell ({}, {}) is {}, expected {}",
            errorcode,
            site,
            actual,
            expected
        );
    }

    Ok(())
}
