use rusqlite::Connection;

use crate::{Result, StoreKind};

// Schema version of persisted stores (increment when changing table definitions)
pub const SCHEMA_VERSION: i32 = 1;

// Persisted stores carry a composite UNIQUE key so that re-ingesting
// overlapping sources keeps the first value. Transient stores accept
// repeated keys; every aggregate sums over matching rows.

pub fn init_schema(conn: &Connection, kind: StoreKind) -> Result<()> {
    if kind == StoreKind::Persisted {
        let current_version: i32 =
            conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        if current_version != SCHEMA_VERSION {
            drop_all_tables(conn)?;
        }
    }

    let unique_key = match kind {
        StoreKind::Persisted => ",\n            UNIQUE (stepname, sitename, errorcode)",
        StoreKind::Transient => "",
    };

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS workflows (
            stepname TEXT NOT NULL,
            errorcode TEXT NOT NULL,
            sitename TEXT NOT NULL,
            numbererrors INTEGER NOT NULL{}
        );

        CREATE TABLE IF NOT EXISTS site_readiness (
            sitename TEXT PRIMARY KEY,
            readiness TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_workflows_step ON workflows(stepname);
        CREATE INDEX IF NOT EXISTS idx_workflows_site_code ON workflows(sitename, errorcode);
        "#,
        unique_key
    ))?;

    if kind == StoreKind::Persisted {
        conn.execute(&format!("PRAGMA user_version = {}", SCHEMA_VERSION), [])?;
    }

    Ok(())
}

fn drop_all_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS workflows;
        DROP TABLE IF EXISTS site_readiness;
        "#,
    )?;
    Ok(())
}
