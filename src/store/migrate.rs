use rusqlite::{Connection, OptionalExtension, Result};

const SHEET_TABLES_VERSION: &str = "20251101_0001_create_sheet_tables";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Create the worksheet tables.
///
/// Value columns carry no declared type, so every cell keeps the storage
/// class it was written with (text, integer, real or null).
fn create_sheet_tables(conn: &Connection) -> Result<()> {
    if migration_applied(conn, SHEET_TABLES_VERSION)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS worksheets (
            name     TEXT PRIMARY KEY,
            headers  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sheet_rows (
            worksheet TEXT NOT NULL,
            position  INTEGER NOT NULL,
            c0, c1, c2, c3, c4, c5, c6, c7, c8,
            PRIMARY KEY (worksheet, position)
        );
        "#,
    )?;

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Created worksheet tables')",
        [SHEET_TABLES_VERSION],
    )?;

    log::info!("migration applied: {SHEET_TABLES_VERSION}");
    Ok(())
}

/// Public entry point: run all pending migrations.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_sheet_tables(conn)?;
    Ok(())
}
