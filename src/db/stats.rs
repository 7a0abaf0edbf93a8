use crate::db::migrate::applied_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let n = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(n)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let drivers: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT driver_id) FROM duty_entries",
        [],
        |row| row.get(0),
    )?;
    println!("{}• Drivers:{} {}{}{}", CYAN, RESET, GREEN, drivers, RESET);
    println!(
        "{}• Daily logs:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        count(pool, "hos_logs")?,
        RESET
    );
    println!(
        "{}• Duty entries:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        count(pool, "duty_entries")?,
        RESET
    );

    let open_violations: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM violations WHERE status = 'open'",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Open violations:{} {}{}{}",
        CYAN, RESET, YELLOW, open_violations, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT log_date FROM hos_logs ORDER BY log_date ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_date: Option<String> = pool
        .conn
        .query_row(
            "SELECT log_date FROM hos_logs ORDER BY log_date DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Log range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    let migrations = applied_migrations(&pool.conn)?;
    println!(
        "{}• Schema:{} {} migration(s), latest {}",
        CYAN,
        RESET,
        migrations.len(),
        migrations.last().map(String::as_str).unwrap_or("--")
    );

    println!();
    Ok(())
}
