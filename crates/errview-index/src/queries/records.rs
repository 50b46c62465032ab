use errview_types::{Dimension, ErrorRecord, compare_error_codes};
use rusqlite::{Connection, params};

use crate::{Error, InsertOutcome, RecordFilter, Result, StoreKind};

pub fn insert(conn: &Connection, record: &ErrorRecord, kind: StoreKind) -> Result<InsertOutcome> {
    let count = to_sql_count(record.count)?;

    let sql = match kind {
        StoreKind::Transient => {
            r#"
            INSERT INTO workflows (stepname, errorcode, sitename, numbererrors)
            VALUES (?1, ?2, ?3, ?4)
            "#
        }
        StoreKind::Persisted => {
            r#"
            INSERT INTO workflows (stepname, errorcode, sitename, numbererrors)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(stepname, sitename, errorcode) DO NOTHING
            "#
        }
    };

    let changed = conn
        .prepare_cached(sql)?
        .execute(params![&record.step, &record.errorcode, &record.site, count])?;

    if changed == 0 {
        Ok(InsertOutcome::Duplicate)
    } else {
        Ok(InsertOutcome::Inserted)
    }
}

pub fn count(conn: &Connection, step: &str, site: &str, errorcode: &str) -> Result<u64> {
    let total: i64 = conn.query_row(
        r#"
        SELECT COALESCE(SUM(numbererrors), 0)
        FROM workflows
        WHERE stepname = ?1 AND sitename = ?2 AND errorcode = ?3
        "#,
        params![step, site, errorcode],
        |row| row.get(0),
    )?;

    from_sql_count(total)
}

/// Records matching `filter`, ordered by (errorcode, site, step).
///
/// Rows sharing a key (transient stores only) keep their insertion order.
pub fn list(conn: &Connection, filter: &RecordFilter) -> Result<Vec<ErrorRecord>> {
    let mut where_clauses = vec!["1 = 1".to_string()];
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    for (dimension, value) in [
        (Dimension::Step, &filter.step),
        (Dimension::Site, &filter.site),
        (Dimension::ErrorCode, &filter.errorcode),
    ] {
        if let Some(value) = value {
            where_clauses.push(format!("{} = ?", dimension.as_str()));
            params.push(Box::new(value.clone()));
        }
    }

    if let Some(classes) = &filter.readiness {
        if classes.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; classes.len()].join(", ");
        where_clauses.push(format!(
            "sitename IN (SELECT sitename FROM site_readiness WHERE readiness IN ({}))",
            placeholders
        ));
        for class in classes {
            params.push(Box::new(class.clone()));
        }
    }

    let query = format!(
        r#"
        SELECT stepname, sitename, errorcode, numbererrors
        FROM workflows
        WHERE {}
        ORDER BY rowid
        "#,
        where_clauses.join(" AND ")
    );

    let mut stmt = conn.prepare(&query)?;
    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(param_refs.as_slice(), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut records = rows
        .into_iter()
        .map(|(step, site, errorcode, count)| {
            Ok(ErrorRecord::new(step, site, errorcode, from_sql_count(count)?))
        })
        .collect::<Result<Vec<_>>>()?;

    records.sort_by(|a, b| {
        compare_error_codes(&a.errorcode, &b.errorcode)
            .then_with(|| a.site.cmp(&b.site))
            .then_with(|| a.step.cmp(&b.step))
    });

    Ok(records)
}

pub fn distinct(conn: &Connection, dimension: Dimension) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT DISTINCT {} FROM workflows",
        dimension.as_str()
    ))?;

    let values = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;

    Ok(values)
}

pub fn row_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM workflows", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn total(conn: &Connection) -> Result<u64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(numbererrors), 0) FROM workflows",
        [],
        |row| row.get(0),
    )?;

    from_sql_count(total)
}

fn to_sql_count(count: u64) -> Result<i64> {
    i64::try_from(count).map_err(|_| Error::Query(format!("error count {} out of range", count)))
}

fn from_sql_count(count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|_| Error::Query(format!("negative error count {}", count)))
}
