pub mod duty_entry;
pub mod duty_status;
pub mod hos_log;
pub mod hos_status;
