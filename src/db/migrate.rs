use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

/// Versioned schema steps, applied in order.
/// Each applied version is recorded in `log` as `migration_applied`.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250301_0001_create_hos_logs",
        "Created hos_logs table",
        r#"
        CREATE TABLE IF NOT EXISTS hos_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id   TEXT NOT NULL,
            log_date    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            UNIQUE(driver_id, log_date)
        );

        CREATE INDEX IF NOT EXISTS idx_hos_logs_driver_date ON hos_logs(driver_id, log_date);
        "#,
    ),
    (
        "20250301_0002_create_duty_entries",
        "Created duty_entries table",
        r#"
        CREATE TABLE IF NOT EXISTS duty_entries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            log_id      INTEGER NOT NULL REFERENCES hos_logs(id),
            driver_id   TEXT NOT NULL,
            status      TEXT NOT NULL CHECK(status IN ('driving','on_duty_not_driving','sleeper_berth','off_duty')),
            start_time  TEXT NOT NULL,
            end_time    TEXT NOT NULL,
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_duty_entries_driver_start ON duty_entries(driver_id, start_time);
        "#,
    ),
    (
        "20250310_0003_create_violations",
        "Created violations table",
        r#"
        CREATE TABLE IF NOT EXISTS violations (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            driver_id    TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('11_hour','14_hour','70_hour','30_min_break')),
            description  TEXT NOT NULL,
            severity     TEXT NOT NULL CHECK(severity IN ('minor','major')),
            status       TEXT NOT NULL DEFAULT 'open' CHECK(status IN ('open','resolved')),
            log_date     TEXT NOT NULL,
            detected_at  TEXT NOT NULL,
            resolved_at  TEXT,
            UNIQUE(driver_id, kind, log_date)
        );
        "#,
    ),
    (
        "20250402_0004_add_entry_note",
        "Added note column to duty_entries",
        "ALTER TABLE duty_entries ADD COLUMN note TEXT;",
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
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

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already recorded as applied, oldest first.
pub fn applied_migrations(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;

    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Public entry point: run all pending migrations, returning how many ran.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        tx.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [version, message],
        )?;
        tx.commit()?;

        applied += 1;
    }

    Ok(applied)
}
