pub mod add;
pub mod backup;
pub mod calculator;
pub mod import;
pub mod log;
pub mod logic;
pub mod status;
pub mod violations;
