use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{load_violations, resolve_violation};
use crate::errors::AppResult;
use crate::models::hos_status::ViolationRecord;

pub struct ViolationLogic;

impl ViolationLogic {
    pub fn list(pool: &mut DbPool, driver_id: &str, only_open: bool) -> AppResult<Vec<ViolationRecord>> {
        load_violations(&pool.conn, driver_id, only_open)
    }

    pub fn resolve(pool: &mut DbPool, id: i64) -> AppResult<ViolationRecord> {
        let record = resolve_violation(&pool.conn, id)?;
        audit(
            &pool.conn,
            "resolve",
            &record.driver_id,
            &format!("Resolved violation #{} ({})", record.id, record.kind.to_db_str()),
        );
        Ok(record)
    }
}
