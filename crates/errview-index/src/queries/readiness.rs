use errview_types::SiteReadinessMap;
use rusqlite::{Connection, params};

use crate::Result;

pub fn replace_all(conn: &Connection, readiness: &SiteReadinessMap) -> Result<()> {
    conn.execute("DELETE FROM site_readiness", [])?;

    let mut stmt = conn.prepare_cached(
        r#"
        INSERT INTO site_readiness (sitename, readiness)
        VALUES (?1, ?2)
        "#,
    )?;
    for (site, class) in readiness {
        stmt.execute(params![site, class])?;
    }

    Ok(())
}

pub fn list(conn: &Connection) -> Result<SiteReadinessMap> {
    let mut stmt = conn.prepare(
        r#"
        SELECT sitename, readiness
        FROM site_readiness
        ORDER BY sitename
        "#,
    )?;

    let readiness = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<SiteReadinessMap, _>>()?;

    Ok(readiness)
}
